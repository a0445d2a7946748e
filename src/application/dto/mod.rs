/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod fetch_sbom_request;
mod fetch_sbom_response;

pub use fetch_sbom_request::FetchSbomRequest;
pub use fetch_sbom_response::FetchSbomResponse;
