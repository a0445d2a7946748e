use crate::shared::Result;

/// OutputPresenter port for presenting the retrieved SBOM
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the SBOM document is written.
pub trait OutputPresenter {
    /// Presents the SBOM document to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is rejected by security checks
    fn present(&self, content: &str) -> Result<()>;
}
