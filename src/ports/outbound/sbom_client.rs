use crate::ports::outbound::{GetSbomForDepGraphRequest, GetSbomForDepGraphResult};
use crate::shared::{CallContext, Result};
use async_trait::async_trait;

/// SbomClient port for retrieving an SBOM generated from a dependency graph
///
/// This port abstracts the remote SBOM service. Implementations include the
/// HTTP adapter, the retrying decorator and the mock in `crate::testing`.
///
/// # Contract
/// - Exactly one of result or error is produced per call.
/// - A call made with a context that is cancelled or past its deadline, or
///   whose context ends while the call is in flight, fails; it never hangs
///   and never returns a stale result.
/// - The error is undifferentiated at this boundary. The HTTP adapter does
///   not retry; `RetryingSbomClient` layers that on top.
/// - Repeated calls with identical arguments may return different documents
///   if the service state changed in between.
#[async_trait]
pub trait SbomClient: Send + Sync {
    /// Retrieves the SBOM for the dependency graph named by `org_id` and
    /// `project_id`
    ///
    /// # Arguments
    /// * `ctx` - Cancellation, deadline and trace carrier for this call
    /// * `org_id` - Organization owning the dependency graph (non-empty)
    /// * `project_id` - Project the dependency graph belongs to (non-empty)
    /// * `request` - Desired SBOM characteristics and the graph payload
    ///
    /// # Errors
    /// Returns an error if:
    /// - The context is cancelled or its deadline passes
    /// - The identifiers are invalid or do not resolve to a dependency graph
    /// - The service is unreachable or rejects the request
    async fn get_sbom_for_dep_graph(
        &self,
        ctx: &CallContext,
        org_id: &str,
        project_id: &str,
        request: &GetSbomForDepGraphRequest,
    ) -> Result<GetSbomForDepGraphResult>;
}
