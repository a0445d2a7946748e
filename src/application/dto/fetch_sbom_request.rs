use crate::ports::outbound::SbomSubject;
use crate::sbom_retrieval::domain::SbomFormat;
use std::path::PathBuf;

/// FetchSbomRequest - Internal request DTO for the SBOM retrieval use case
///
/// Identifiers are kept as raw strings here; the use case validates them
/// before any I/O happens.
#[derive(Debug, Clone)]
pub struct FetchSbomRequest {
    /// Organization that owns the dependency graph
    pub org_id: String,
    /// Project the dependency graph belongs to
    pub project_id: String,
    /// Requested SBOM format
    pub format: SbomFormat,
    /// Dependency graph file to send; `None` lets the service resolve it
    pub dep_graph_path: Option<PathBuf>,
    /// Optional top-level component description
    pub subject: Option<SbomSubject>,
}

impl FetchSbomRequest {
    pub fn new(org_id: impl Into<String>, project_id: impl Into<String>, format: SbomFormat) -> Self {
        Self {
            org_id: org_id.into(),
            project_id: project_id.into(),
            format,
            dep_graph_path: None,
            subject: None,
        }
    }

    pub fn with_dep_graph_path(mut self, path: PathBuf) -> Self {
        self.dep_graph_path = Some(path);
        self
    }

    pub fn with_subject(mut self, subject: SbomSubject) -> Self {
        self.subject = Some(subject);
        self
    }
}
