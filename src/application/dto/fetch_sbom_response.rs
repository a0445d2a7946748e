use crate::ports::outbound::GetSbomForDepGraphResult;
use crate::sbom_retrieval::domain::DepGraphLocator;

/// FetchSbomResponse - Internal response DTO from the SBOM retrieval use case
#[derive(Debug, Clone)]
pub struct FetchSbomResponse {
    /// Where the SBOM came from
    pub locator: DepGraphLocator,
    /// The retrieved document, guaranteed non-empty
    pub result: GetSbomForDepGraphResult,
}

impl FetchSbomResponse {
    pub fn new(locator: DepGraphLocator, result: GetSbomForDepGraphResult) -> Self {
        Self { locator, result }
    }
}
