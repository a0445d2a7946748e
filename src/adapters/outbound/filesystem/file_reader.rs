use crate::ports::outbound::DepGraphReader;
use crate::shared::error::SbomError;
use crate::shared::security::{read_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading dependency graphs from disk
///
/// This adapter implements the DepGraphReader port. Files go through the
/// shared input checks (no symlinks, regular files only, size limit) before
/// being parsed as JSON.
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
        }
    }

    /// Creates a reader with a custom size limit in bytes
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DepGraphReader for FileSystemReader {
    fn read_dep_graph(&self, path: &Path) -> Result<serde_json::Value> {
        if !path.exists() {
            return Err(SbomError::FileReadError {
                path: path.to_path_buf(),
                details: "Dependency graph file does not exist".to_string(),
            }
            .into());
        }

        let content = read_regular_file(path, "dependency graph", self.max_size)?;

        let dep_graph: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| SbomError::DepGraphParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        if !dep_graph.is_object() {
            return Err(SbomError::DepGraphParseError {
                path: path.to_path_buf(),
                details: "top-level value is not a JSON object".to_string(),
            }
            .into());
        }

        tracing::debug!(path = %path.display(), bytes = content.len(), "Read dependency graph");
        Ok(dep_graph)
    }
}
