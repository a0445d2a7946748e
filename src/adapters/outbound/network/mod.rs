/// Network adapters for the SBOM service
mod http_sbom_client;
mod retrying_sbom_client;

pub use http_sbom_client::HttpSbomClient;
pub use retrying_sbom_client::RetryingSbomClient;
