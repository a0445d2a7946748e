use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Receives failures from mocks.
///
/// `fatal` must not return: the mock has no value to hand back to the
/// code under test once a call cannot be matched.
pub trait TestReporter: Send + Sync {
    /// Records a failure and lets the test continue
    fn error(&self, message: &str);

    /// Records a failure and aborts the current test
    fn fatal(&self, message: &str) -> !;
}

/// Reports failures the way the Rust test harness expects: by panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl TestReporter for PanicReporter {
    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn fatal(&self, message: &str) -> ! {
        panic!("{}", message)
    }
}

/// Anything whose expectations the controller verifies at teardown.
pub(crate) trait CallSet: Send + Sync {
    /// One message per expectation that was called fewer times than required
    fn missing_calls(&self) -> Vec<String>;
}

/// Controller owns the failure reporter and verifies every mock created
/// from it.
///
/// Verification runs on [`Controller::finish`] or, failing that, when the
/// last clone of the controller is dropped; it is skipped if the thread is
/// already panicking so the first failure stays visible.
///
/// Mocks keep a clone, so the controller lives at least as long as they do.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    reporter: Box<dyn TestReporter>,
    call_sets: Mutex<Vec<Arc<dyn CallSet>>>,
    finished: AtomicBool,
}

impl Controller {
    pub fn new() -> Self {
        Self::with_reporter(PanicReporter)
    }

    pub fn with_reporter(reporter: impl TestReporter + 'static) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                reporter: Box::new(reporter),
                call_sets: Mutex::new(Vec::new()),
                finished: AtomicBool::new(false),
            }),
        }
    }

    pub(crate) fn register(&self, call_set: Arc<dyn CallSet>) {
        self.inner.call_sets().push(call_set);
    }

    /// Reports `message` and aborts the current test.
    pub fn fatal(&self, message: &str) -> ! {
        self.inner.reporter.fatal(message)
    }

    /// Verifies that every expectation got its minimum number of calls.
    ///
    /// Runs at most once per controller.
    pub fn finish(&self) {
        self.inner.finish();
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("call_sets", &self.inner.call_sets().len())
            .field("finished", &self.inner.finished.load(Ordering::SeqCst))
            .finish()
    }
}

impl ControllerInner {
    fn call_sets(&self) -> MutexGuard<'_, Vec<Arc<dyn CallSet>>> {
        self.call_sets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }

        let call_sets = self.call_sets().clone();
        let missing: Vec<String> = call_sets
            .iter()
            .flat_map(|call_set| call_set.missing_calls())
            .collect();

        if missing.is_empty() {
            return;
        }

        for message in &missing {
            self.reporter.error(message);
        }
        self.reporter.fatal(&format!(
            "aborting test due to {} missing call(s)",
            missing.len()
        ));
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.finish();
        }
    }
}
