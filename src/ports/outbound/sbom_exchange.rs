use crate::sbom_retrieval::domain::SbomFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The component an SBOM is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SbomSubject {
    pub name: String,
    pub version: String,
}

impl SbomSubject {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// GetSbomForDepGraphRequest - what to produce for a dependency graph
///
/// The dependency graph itself is opaque to the client and forwarded
/// untouched; the service is the one that rejects malformed graphs.
#[derive(Debug, Clone, PartialEq)]
pub struct GetSbomForDepGraphRequest {
    /// Requested output format
    pub format: SbomFormat,
    /// Dependency graph document, `Null` when the service should resolve it
    /// from the identifiers alone
    pub dep_graph: serde_json::Value,
    /// Optional top-level component description
    pub subject: Option<SbomSubject>,
}

impl GetSbomForDepGraphRequest {
    pub fn new(format: SbomFormat) -> Self {
        Self {
            format,
            dep_graph: serde_json::Value::Null,
            subject: None,
        }
    }

    pub fn with_dep_graph(mut self, dep_graph: serde_json::Value) -> Self {
        self.dep_graph = dep_graph;
        self
    }

    pub fn with_subject(mut self, subject: SbomSubject) -> Self {
        self.subject = Some(subject);
        self
    }
}

/// GetSbomForDepGraphResult - a retrieved SBOM document
#[derive(Debug, Clone, PartialEq)]
pub struct GetSbomForDepGraphResult {
    /// The SBOM document text
    pub document: String,
    /// MIME type reported by the service
    pub media_type: String,
    /// When the client received the document
    pub retrieved_at: DateTime<Utc>,
}

impl GetSbomForDepGraphResult {
    pub fn new(document: String, media_type: String) -> Self {
        Self {
            document,
            media_type,
            retrieved_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.document.trim().is_empty()
    }

    pub fn size(&self) -> usize {
        self.document.len()
    }
}
