//! Test doubles for the SbomClient port.
//!
//! A [`Controller`] verifies every mock created from it. Declare expected
//! calls on a [`MockSbomClient`], hand the mock to the code under test, and
//! let the controller go out of scope (or call [`Controller::finish`]) to
//! check that each expectation was met. Unexpected calls fail the test at
//! the point of the call.
//!
//! Mocks are `Send + Sync`, so they can be used from spawned tasks and
//! threads; expectations are matched under a lock in declaration order.
//!
//! Arguments are matched with [`predicates`]; the commonly used items are
//! re-exported here.

mod controller;
mod mock_sbom_client;

pub use controller::{Controller, PanicReporter, TestReporter};
pub use mock_sbom_client::{Expectation, MockSbomClient, MockSbomClientRecorder};
pub use predicates::prelude::{predicate, Predicate, PredicateBooleanExt};
