/// Behavioral tests for the MockSbomClient test double, driven through the
/// public API the way a downstream crate would use it.
use depgraph_sbom::prelude::*;
use depgraph_sbom::testing::{
    predicate, Controller, MockSbomClient, PredicateBooleanExt, TestReporter,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// Records every failure instead of printing it; `fatal` still aborts.
#[derive(Clone, Default)]
struct RecordingReporter {
    errors: Arc<Mutex<Vec<String>>>,
    fatals: Arc<Mutex<Vec<String>>>,
}

impl TestReporter for RecordingReporter {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn fatal(&self, message: &str) -> ! {
        self.fatals.lock().unwrap().push(message.to_string());
        panic!("{}", message)
    }
}

fn spdx_request() -> GetSbomForDepGraphRequest {
    GetSbomForDepGraphRequest::new(SbomFormat::Spdx23Json)
}

fn sbom(document: &str) -> GetSbomForDepGraphResult {
    GetSbomForDepGraphResult::new(document.to_string(), "application/spdx+json".to_string())
}

// ============================================================================
// Expect-exactly-once semantics
// ============================================================================

mod exactly_once_tests {
    use super::*;

    #[tokio::test]
    async fn test_programmed_result_returned_once() {
        let ctrl = Controller::new();
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("org1"),
                predicate::eq("proj1"),
                predicate::eq(spdx_request()),
            )
            .return_ok(sbom(r#"{"spdxVersion":"SPDX-2.3"}"#));

        let result = mock
            .get_sbom_for_dep_graph(&CallContext::background(), "org1", "proj1", &spdx_request())
            .await;

        assert_eq!(result.unwrap().document, r#"{"spdxVersion":"SPDX-2.3"}"#);
        ctrl.finish();
    }

    #[tokio::test]
    async fn test_second_identical_call_fails_the_test() {
        let reporter = RecordingReporter::default();
        let ctrl = Controller::with_reporter(reporter.clone());
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("org1"),
                predicate::eq("proj1"),
                predicate::eq(spdx_request()),
            )
            .return_ok(sbom("{}"));

        let ctx = CallContext::background();
        let request = spdx_request();
        assert!(mock
            .get_sbom_for_dep_graph(&ctx, "org1", "proj1", &request)
            .await
            .is_ok());

        let second = catch_unwind(AssertUnwindSafe(|| {
            futures::executor::block_on(mock.get_sbom_for_dep_graph(
                &ctx,
                "org1",
                "proj1",
                &request,
            ))
        }));

        assert!(second.is_err());
        let fatals = reporter.fatals.lock().unwrap();
        assert_eq!(fatals.len(), 1);
        assert!(fatals[0].starts_with("Unexpected call to MockSbomClient.get_sbom_for_dep_graph("));
        assert!(fatals[0].contains("max number of times (1)"));
    }

    #[tokio::test]
    async fn test_two_expectations_allow_two_calls() {
        let ctrl = Controller::new();
        let mock = MockSbomClient::new(&ctrl);
        for document in ["first", "second"] {
            mock.expect()
                .get_sbom_for_dep_graph(
                    predicate::always(),
                    predicate::eq("org1"),
                    predicate::eq("proj1"),
                    predicate::always(),
                )
                .return_ok(sbom(document));
        }

        let ctx = CallContext::background();
        let first = mock.get_sbom_for_dep_graph(&ctx, "org1", "proj1", &spdx_request()).await;
        let second = mock.get_sbom_for_dep_graph(&ctx, "org1", "proj1", &spdx_request()).await;

        assert_eq!(first.unwrap().document, "first");
        assert_eq!(second.unwrap().document, "second");
    }
}

// ============================================================================
// Unexpected calls
// ============================================================================

mod unexpected_call_tests {
    use super::*;

    #[test]
    #[should_panic(expected = "Unexpected call to MockSbomClient.get_sbom_for_dep_graph")]
    fn test_unmatched_call_panics_by_default() {
        let ctrl = Controller::new();
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("org1"),
                predicate::eq("proj1"),
                predicate::always(),
            )
            .any_times()
            .return_ok(sbom("{}"));

        let _ = futures::executor::block_on(mock.get_sbom_for_dep_graph(
            &CallContext::background(),
            "org1",
            "other-project",
            &spdx_request(),
        ));
    }

    #[test]
    fn test_unmatched_call_explains_each_expectation() {
        let reporter = RecordingReporter::default();
        let ctrl = Controller::with_reporter(reporter.clone());
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("org1"),
                predicate::always(),
                predicate::always(),
            )
            .any_times()
            .return_ok(sbom("{}"));
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("org2").not(),
                predicate::always(),
                predicate::always(),
            )
            .any_times()
            .return_ok(sbom("{}"));

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            futures::executor::block_on(mock.get_sbom_for_dep_graph(
                &CallContext::background(),
                "org2",
                "proj1",
                &spdx_request(),
            ))
        }));

        assert!(outcome.is_err());
        let fatals = reporter.fatals.lock().unwrap();
        assert!(fatals[0].contains("want var == \"org1\""));
        assert!(fatals[0].contains("want (! var == \"org2\")"));
    }
}

// ============================================================================
// Teardown verification
// ============================================================================

mod teardown_tests {
    use super::*;

    #[test]
    fn test_missing_calls_reported_at_finish() {
        let reporter = RecordingReporter::default();
        let ctrl = Controller::with_reporter(reporter.clone());
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("acme-corp"),
                predicate::eq("widget-service"),
                predicate::always(),
            )
            .times(2)
            .return_ok(sbom("{}"));

        let _ = futures::executor::block_on(mock.get_sbom_for_dep_graph(
            &CallContext::background(),
            "acme-corp",
            "widget-service",
            &spdx_request(),
        ));

        assert!(catch_unwind(AssertUnwindSafe(|| ctrl.finish())).is_err());
        let errors = reporter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expected at least 2, got 1"));
        assert_eq!(
            reporter.fatals.lock().unwrap()[0],
            "aborting test due to 1 missing call(s)"
        );
    }

    #[test]
    fn test_optional_expectations_pass_finish() {
        let ctrl = Controller::new();
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::always(),
                predicate::always(),
                predicate::always(),
            )
            .any_times()
            .return_ok(sbom("{}"));
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::always(),
                predicate::always(),
                predicate::always(),
            )
            .max_times(3)
            .return_ok(sbom("{}"));

        ctrl.finish();
    }

    #[test]
    #[should_panic(expected = "aborting test due to 1 missing call(s)")]
    fn test_drop_verifies_without_explicit_finish() {
        let ctrl = Controller::new();
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::always(),
                predicate::always(),
                predicate::always(),
            )
            .return_ok(sbom("{}"));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenario_tests {
    use super::*;
    use depgraph_sbom::shared::error::SbomError;

    #[tokio::test]
    async fn test_acme_widget_spdx_and_empty_identifiers() {
        let ctrl = Controller::new();
        let mock = MockSbomClient::new(&ctrl);
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq("acme-corp"),
                predicate::eq("widget-service"),
                predicate::eq(spdx_request()),
            )
            .return_ok(sbom(r#"{"spdxVersion":"SPDX-2.3","name":"widget-service"}"#));
        mock.expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::eq(""),
                predicate::eq(""),
                predicate::always(),
            )
            .returning(|_, org_id, project_id, _| {
                DepGraphLocator::new(org_id, project_id)?;
                unreachable!("empty identifiers are always rejected")
            });

        let ctx = CallContext::background();
        let found = mock
            .get_sbom_for_dep_graph(&ctx, "acme-corp", "widget-service", &spdx_request())
            .await
            .unwrap();
        assert!(!found.is_empty());

        let rejected = mock
            .get_sbom_for_dep_graph(&ctx, "", "", &spdx_request())
            .await
            .unwrap_err();
        assert!(matches!(
            rejected.downcast_ref::<SbomError>(),
            Some(SbomError::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_shared_across_tasks() {
        let ctrl = Controller::new();
        let mock = Arc::new(MockSbomClient::new(&ctrl));
        let expectation = mock
            .expect()
            .get_sbom_for_dep_graph(
                predicate::always(),
                predicate::always(),
                predicate::always(),
                predicate::always(),
            )
            .times(8)
            .returning(|_, org_id, _, _| Ok(sbom(org_id)));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let mock = mock.clone();
                tokio::spawn(async move {
                    let org_id = format!("org{}", i);
                    mock.get_sbom_for_dep_graph(
                        &CallContext::background(),
                        &org_id,
                        "proj",
                        &spdx_request(),
                    )
                    .await
                    .map(|result| result.document == org_id)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }
        assert_eq!(expectation.call_count(), 8);
    }
}
