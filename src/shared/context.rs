use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// CallContext carries cancellation, an optional deadline and a trace id
/// for a single client invocation.
///
/// Contexts form a tree: cancelling a context cancels every context derived
/// from it, never its parent. A derived context inherits the trace id and
/// can only tighten the deadline.
///
/// # Example
/// ```
/// use depgraph_sbom::shared::CallContext;
/// use std::time::Duration;
///
/// let root = CallContext::background();
/// let call = root.with_timeout(Duration::from_secs(30));
/// assert_eq!(call.trace_id(), root.trace_id());
/// root.cancel();
/// assert!(call.is_cancelled());
/// ```
#[derive(Clone)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    trace_id: Uuid,
}

impl CallContext {
    /// A root context: never cancelled unless asked, no deadline, fresh trace id.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
            trace_id: Uuid::new_v4(),
        }
    }

    /// Replaces the trace id, e.g. to propagate one received from upstream.
    pub fn with_trace_id(mut self, trace_id: Uuid) -> Self {
        self.trace_id = trace_id;
        self
    }

    /// Derives a context that is cancelled together with this one.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
            trace_id: self.trace_id,
        }
    }

    /// Derives a context that expires after `timeout`, or earlier if this one does.
    ///
    /// A timeout too large to represent as an instant adds no deadline of
    /// its own; the derived context keeps this one's.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.child(),
        }
    }

    /// Derives a context that expires at `deadline`, or earlier if this one does.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let mut child = self.child();
        child.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        child
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Returns why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<SbomError> {
        if self.token.is_cancelled() {
            return Some(SbomError::Cancelled {
                trace_id: self.trace_id,
            });
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(SbomError::DeadlineExceeded {
                trace_id: self.trace_id,
            }),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> SbomError {
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => SbomError::Cancelled { trace_id: self.trace_id },
            _ = expired => SbomError::DeadlineExceeded { trace_id: self.trace_id },
        }
    }

    /// Drives `future` to completion unless the context ends first.
    ///
    /// A context that is already done fails immediately and `future` is
    /// never polled. Cancellation wins over a simultaneously ready result.
    pub async fn run<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if let Some(reason) = self.err() {
            return Err(reason.into());
        }

        tokio::select! {
            biased;
            reason = self.done() => Err(reason.into()),
            output = future => output,
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("trace_id", &self.trace_id)
            .field("deadline", &self.remaining())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
