use crate::ports::outbound::{GetSbomForDepGraphRequest, GetSbomForDepGraphResult, SbomClient};
use crate::sbom_retrieval::policies::RetryPolicy;
use crate::shared::error::is_retryable;
use crate::shared::{CallContext, Result};
use async_trait::async_trait;

/// RetryingSbomClient wraps an SbomClient and repeats transient failures.
///
/// This adapter implements the decorator pattern: the wrapped client keeps
/// its fail-fast contract and this layer owns the retry decision. Only
/// errors classified as retryable (5xx, 408, 429, transport timeouts and
/// connection failures) are repeated. Back-off sleeps run under the call
/// context, so cancelling it stops the retry loop immediately.
pub struct RetryingSbomClient<C: SbomClient> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: SbomClient> RetryingSbomClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: SbomClient> SbomClient for RetryingSbomClient<C> {
    async fn get_sbom_for_dep_graph(
        &self,
        ctx: &CallContext,
        org_id: &str,
        project_id: &str,
        request: &GetSbomForDepGraphRequest,
    ) -> Result<GetSbomForDepGraphResult> {
        let mut retry = 0;

        loop {
            match self
                .inner
                .get_sbom_for_dep_graph(ctx, org_id, project_id, request)
                .await
            {
                Ok(result) => return Ok(result),
                Err(e) if retry < self.policy.max_retries() && is_retryable(&e) => {
                    retry += 1;
                    let delay = self.policy.delay_for(retry);
                    tracing::warn!(
                        trace_id = %ctx.trace_id(),
                        retry,
                        max_retries = self.policy.max_retries(),
                        ?delay,
                        "SBOM request failed, retrying: {}",
                        e
                    );
                    ctx.run(async {
                        tokio::time::sleep(delay).await;
                        Ok(())
                    })
                    .await?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
