/// Use cases module containing application business logic orchestration
mod fetch_sbom;

pub use fetch_sbom::FetchSbomUseCase;
