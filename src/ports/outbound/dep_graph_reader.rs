use crate::shared::Result;
use std::path::Path;

/// DepGraphReader port for loading a dependency graph document
///
/// This port abstracts the file system operations needed to read the
/// dependency graph that is sent along with an SBOM request.
pub trait DepGraphReader {
    /// Reads and parses the dependency graph stored at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file is not valid JSON or its top level is not an object
    fn read_dep_graph(&self, path: &Path) -> Result<serde_json::Value>;
}
