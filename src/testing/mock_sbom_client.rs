use crate::ports::outbound::{GetSbomForDepGraphRequest, GetSbomForDepGraphResult, SbomClient};
use crate::shared::{CallContext, Result};
use crate::testing::controller::{CallSet, Controller};
use async_trait::async_trait;
use predicates::Predicate;
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type ArgPredicate<T> = Box<dyn Predicate<T> + Send + Sync>;

type SbomOutcome = Arc<
    dyn Fn(&CallContext, &str, &str, &GetSbomForDepGraphRequest) -> Result<GetSbomForDepGraphResult>
        + Send
        + Sync,
>;

/// MockSbomClient is a scripted SbomClient for tests.
///
/// Expectations are declared through [`MockSbomClient::expect`] before the
/// code under test runs. Every call is matched against them in declaration
/// order; the first usable match produces the programmed outcome. A call
/// nothing matches is reported to the controller as fatal, and expectations
/// left unsatisfied are reported when the controller finishes.
///
/// The mock is `Send + Sync` and may be shared between tasks; matching is
/// serialized by an internal lock that is released before the outcome runs.
///
/// # Example
/// ```
/// use depgraph_sbom::prelude::*;
/// use depgraph_sbom::testing::{predicate, Controller, MockSbomClient};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ctrl = Controller::new();
/// let mock = MockSbomClient::new(&ctrl);
/// let request = GetSbomForDepGraphRequest::new(SbomFormat::Spdx23Json);
/// let sbom = GetSbomForDepGraphResult::new("{}".into(), "application/spdx+json".into());
///
/// mock.expect()
///     .get_sbom_for_dep_graph(
///         predicate::always(),
///         predicate::eq("org1"),
///         predicate::eq("proj1"),
///         predicate::eq(request.clone()),
///     )
///     .return_ok(sbom.clone());
///
/// let result = mock
///     .get_sbom_for_dep_graph(&CallContext::background(), "org1", "proj1", &request)
///     .await
///     .unwrap();
/// assert_eq!(result, sbom);
/// # }
/// ```
pub struct MockSbomClient {
    ctrl: Controller,
    calls: Arc<SbomCallSet>,
}

/// Records expectations on a [`MockSbomClient`].
pub struct MockSbomClientRecorder<'a> {
    mock: &'a MockSbomClient,
}

/// Handle to one registered expectation, used to configure it fluently.
///
/// Every builder method takes and returns the handle, so a configured
/// expectation can be kept in a variable for `after` or `call_count`.
#[derive(Clone)]
pub struct Expectation {
    calls: Arc<SbomCallSet>,
    index: usize,
}

impl MockSbomClient {
    pub fn new(ctrl: &Controller) -> Self {
        let calls = Arc::new(SbomCallSet::default());
        ctrl.register(calls.clone());
        Self {
            ctrl: ctrl.clone(),
            calls,
        }
    }

    /// Returns the recorder used to declare expected calls.
    pub fn expect(&self) -> MockSbomClientRecorder<'_> {
        MockSbomClientRecorder { mock: self }
    }
}

impl MockSbomClientRecorder<'_> {
    /// Expects a call whose arguments satisfy the given predicates.
    ///
    /// The expectation defaults to exactly one call and has no outcome until
    /// one of `return_ok`, `return_err` or `returning` is set.
    #[track_caller]
    pub fn get_sbom_for_dep_graph(
        &self,
        ctx: impl Predicate<CallContext> + Send + Sync + 'static,
        org_id: impl Predicate<str> + Send + Sync + 'static,
        project_id: impl Predicate<str> + Send + Sync + 'static,
        request: impl Predicate<GetSbomForDepGraphRequest> + Send + Sync + 'static,
    ) -> Expectation {
        let expected = ExpectedCall {
            ctx: Box::new(ctx),
            org_id: Box::new(org_id),
            project_id: Box::new(project_id),
            request: Box::new(request),
            origin: Location::caller(),
            min_calls: 1,
            max_calls: 1,
            num_calls: 0,
            prerequisites: Vec::new(),
            outcome: None,
        };

        let calls = self.mock.calls.clone();
        let index = {
            let mut expected_calls = calls.lock();
            expected_calls.push(expected);
            expected_calls.len() - 1
        };
        Expectation { calls, index }
    }
}

impl Expectation {
    /// Answers matching calls with a clone of `result`.
    pub fn return_ok(self, result: GetSbomForDepGraphResult) -> Self {
        self.returning(move |_, _, _, _| Ok(result.clone()))
    }

    /// Answers matching calls with an error carrying `message`.
    pub fn return_err(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.returning(move |_, _, _, _| Err(anyhow::anyhow!("{}", message)))
    }

    /// Answers matching calls by running `outcome` with the call arguments.
    pub fn returning<F>(self, outcome: F) -> Self
    where
        F: Fn(&CallContext, &str, &str, &GetSbomForDepGraphRequest) -> Result<GetSbomForDepGraphResult>
            + Send
            + Sync
            + 'static,
    {
        self.update(|call| call.outcome = Some(Arc::new(outcome)));
        self
    }

    /// Expects exactly `n` calls.
    pub fn times(self, n: usize) -> Self {
        self.update(|call| {
            call.min_calls = n;
            call.max_calls = n;
        });
        self
    }

    /// Allows any number of calls, including none.
    pub fn any_times(self) -> Self {
        self.update(|call| {
            call.min_calls = 0;
            call.max_calls = usize::MAX;
        });
        self
    }

    /// Expects at least `n` calls; lifts the default upper bound of one.
    pub fn min_times(self, n: usize) -> Self {
        self.update(|call| {
            call.min_calls = n;
            if call.max_calls == 1 {
                call.max_calls = usize::MAX;
            }
        });
        self
    }

    /// Allows at most `n` calls; lifts the default lower bound of one.
    pub fn max_times(self, n: usize) -> Self {
        self.update(|call| {
            call.max_calls = n;
            if call.min_calls == 1 {
                call.min_calls = 0;
            }
        });
        self
    }

    /// Makes this expectation usable only after `prerequisite` is satisfied.
    ///
    /// # Panics
    /// Panics if `prerequisite` is this expectation or belongs to another mock.
    pub fn after(self, prerequisite: &Expectation) -> Self {
        assert!(
            Arc::ptr_eq(&self.calls, &prerequisite.calls),
            "after() requires an expectation on the same mock"
        );
        assert_ne!(
            self.index, prerequisite.index,
            "an expectation cannot be its own prerequisite"
        );
        let prerequisite = prerequisite.index;
        self.update(|call| call.prerequisites.push(prerequisite));
        self
    }

    /// How many calls this expectation has matched so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock()[self.index].num_calls
    }

    /// Whether the minimum number of calls has been reached.
    pub fn is_satisfied(&self) -> bool {
        self.calls.lock()[self.index].is_satisfied()
    }

    fn update(&self, change: impl FnOnce(&mut ExpectedCall)) {
        change(&mut self.calls.lock()[self.index]);
    }
}

#[async_trait]
impl SbomClient for MockSbomClient {
    async fn get_sbom_for_dep_graph(
        &self,
        ctx: &CallContext,
        org_id: &str,
        project_id: &str,
        request: &GetSbomForDepGraphRequest,
    ) -> Result<GetSbomForDepGraphResult> {
        let outcome = match self.calls.match_call(ctx, org_id, project_id, request) {
            Ok(outcome) => outcome,
            Err(message) => self.ctrl.fatal(&message),
        };
        outcome(ctx, org_id, project_id, request)
    }
}

struct ExpectedCall {
    ctx: ArgPredicate<CallContext>,
    org_id: ArgPredicate<str>,
    project_id: ArgPredicate<str>,
    request: ArgPredicate<GetSbomForDepGraphRequest>,
    origin: &'static Location<'static>,
    min_calls: usize,
    max_calls: usize,
    num_calls: usize,
    prerequisites: Vec<usize>,
    outcome: Option<SbomOutcome>,
}

impl ExpectedCall {
    fn is_satisfied(&self) -> bool {
        self.num_calls >= self.min_calls
    }

    fn is_exhausted(&self) -> bool {
        self.num_calls >= self.max_calls
    }

    fn describe(&self) -> String {
        format!(
            "MockSbomClient.get_sbom_for_dep_graph({}, {}, {}, {}) at {}",
            self.ctx,
            self.org_id,
            self.project_id,
            self.request,
            self.origin
        )
    }

    /// Explains the first argument that does not match, if any.
    fn mismatch(
        &self,
        ctx: &CallContext,
        org_id: &str,
        project_id: &str,
        request: &GetSbomForDepGraphRequest,
    ) -> Option<String> {
        if !self.ctx.eval(ctx) {
            return Some(format!("argument 0 (ctx): got {:?}, want {}", ctx, self.ctx));
        }
        if !self.org_id.eval(org_id) {
            return Some(format!("argument 1 (org_id): got {:?}, want {}", org_id, self.org_id));
        }
        if !self.project_id.eval(project_id) {
            return Some(format!(
                "argument 2 (project_id): got {:?}, want {}",
                project_id,
                self.project_id
            ));
        }
        if !self.request.eval(request) {
            return Some(format!("argument 3 (request): got {:?}, want {}", request, self.request));
        }
        None
    }
}

#[derive(Default)]
struct SbomCallSet {
    expected: Mutex<Vec<ExpectedCall>>,
}

impl SbomCallSet {
    fn lock(&self) -> MutexGuard<'_, Vec<ExpectedCall>> {
        self.expected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Finds the first usable expectation for a call, counts the call
    /// against it and returns its outcome; otherwise explains why nothing
    /// matched.
    fn match_call(
        &self,
        ctx: &CallContext,
        org_id: &str,
        project_id: &str,
        request: &GetSbomForDepGraphRequest,
    ) -> std::result::Result<SbomOutcome, String> {
        let mut expected = self.lock();
        let satisfied: Vec<bool> = expected.iter().map(ExpectedCall::is_satisfied).collect();
        let origins: Vec<&'static Location<'static>> =
            expected.iter().map(|call| call.origin).collect();
        let mut reasons = Vec::new();

        for call in expected.iter_mut() {
            if let Some(reason) = call.mismatch(ctx, org_id, project_id, request) {
                reasons.push(format!(
                    "expected call at {} doesn't match the {}",
                    call.origin, reason
                ));
                continue;
            }

            if let Some(&pending) = call
                .prerequisites
                .iter()
                .find(|&&prerequisite| !satisfied[prerequisite])
            {
                reasons.push(format!(
                    "expected call at {} must be made after the call expected at {}",
                    call.origin, origins[pending]
                ));
                continue;
            }

            if call.is_exhausted() {
                reasons.push(format!(
                    "expected call at {} has already been called the max number of times ({})",
                    call.origin, call.max_calls
                ));
                continue;
            }

            call.num_calls += 1;
            return call.outcome.clone().ok_or_else(|| {
                format!(
                    "expected call at {} matched but has no programmed outcome; \
                     set one with return_ok, return_err or returning",
                    call.origin
                )
            });
        }

        let because = if reasons.is_empty() {
            "there are no expected calls of the method".to_string()
        } else {
            format!("\n{}", reasons.join("\n"))
        };
        Err(format!(
            "Unexpected call to MockSbomClient.get_sbom_for_dep_graph(
                {:?},
                {:?},
                {:?},
                {:?},
            ) because: {}",
            ctx, org_id, project_id, request, because
        ))
    }
}

impl CallSet for SbomCallSet {
    fn missing_calls(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|call| !call.is_satisfied())
            .map(|call| {
                format!(
                    "missing call(s) to {}: expected at least {}, got {}",
                    call.describe(),
                    call.min_calls,
                    call.num_calls
                )
            })
            .collect()
    }
}
