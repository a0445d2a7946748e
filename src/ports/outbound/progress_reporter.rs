/// ProgressReporter port for user-facing progress messages
///
/// This port abstracts progress reporting (e.g., to stderr) so the use case
/// can give feedback while it waits on the SBOM service.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Starts an indeterminate wait indicator (e.g., a spinner)
    ///
    /// # Arguments
    /// * `message` - What is being waited on
    fn begin_wait(&self, message: &str);

    /// Stops the wait indicator started by `begin_wait`, if any
    fn end_wait(&self);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
