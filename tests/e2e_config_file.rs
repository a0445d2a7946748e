/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to a request against a local mock service, using `assert_cmd` and `tempfile` for
/// isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use mockito::Matcher;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

const CONFIG_FILENAME: &str = "depgraph-sbom.config.yml";

/// Write a config file at the specified path.
fn write_config(path: &std::path::Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Start a mock service answering one SBOM request for the given project and format.
fn sbom_service(project_id: &str, format: &str) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new();
    let mock = server
        .mock(
            "POST",
            format!("/orgs/acme-corp/projects/{}/sbom", project_id).as_str(),
        )
        .match_query(Matcher::UrlEncoded("format".into(), format.into()))
        .with_status(200)
        .with_body(r#"{"document":"sbom"}"#)
        .create();
    (server, mock)
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_supplies_identifiers_and_endpoint() {
        let dir = TempDir::new().unwrap();
        let (server, mock) = sbom_service("widget-service", "spdx2.3+json");

        write_config(
            &dir.path().join(CONFIG_FILENAME),
            &format!(
                "api_url: {}\norg_id: acme-corp\nproject_id: widget-service\nformat: spdx\n",
                server.url()
            ),
        );

        cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .assert()
            .code(0);

        mock.assert();
    }

    #[test]
    fn test_no_config_file_requires_identifiers() {
        let dir = TempDir::new().unwrap();

        let output = cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3)); // ApplicationError
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid org_id"));
    }
}

// ============================================================================
// Explicit Config Path Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let dir = TempDir::new().unwrap();
        let (server, mock) = sbom_service("gadget", "cyclonedx1.5+json");

        let config_path = dir.path().join("custom.yml");
        write_config(
            &config_path,
            &format!(
                "api_url: {}\norg_id: acme-corp\nproject_id: gadget\nformat: cyclonedx1.5+json\n",
                server.url()
            ),
        );

        cargo_bin_cmd!("depgraph-sbom")
            .args(["-c", config_path.to_str().unwrap()])
            .assert()
            .code(0);

        mock.assert();
    }
}

// ============================================================================
// CLI / Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let dir = TempDir::new().unwrap();
        let (server, mock) = sbom_service("widget-service", "spdx2.3+json");

        write_config(
            &dir.path().join(CONFIG_FILENAME),
            &format!(
                "api_url: {}\norg_id: acme-corp\nproject_id: old-project\nformat: cyclonedx1.4+json\n",
                server.url()
            ),
        );

        cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .args(["--project", "widget-service", "--format", "spdx2.3+json"])
            .assert()
            .code(0);

        mock.assert();
    }

    #[test]
    fn test_unknown_config_field_warns_but_runs() {
        let dir = TempDir::new().unwrap();
        let (server, mock) = sbom_service("widget-service", "cyclonedx1.6+json");

        write_config(
            &dir.path().join(CONFIG_FILENAME),
            &format!(
                "api_url: {}\norg_id: acme-corp\nproject_id: widget-service\ncache_dir: /tmp/sbom\n",
                server.url()
            ),
        );

        let output = cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Unknown config field 'cache_dir'"));
        mock.assert();
    }
}

// ============================================================================
// Error Case Tests
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_invalid_yaml_syntax_error() {
        let dir = TempDir::new().unwrap();

        write_config(
            &dir.path().join(CONFIG_FILENAME),
            "invalid: yaml: [[[broken",
        );

        let output = cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3)); // ApplicationError
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_timeout_validation_error() {
        let dir = TempDir::new().unwrap();

        write_config(&dir.path().join(CONFIG_FILENAME), "timeout_secs: 0\n");

        let output = cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3)); // ApplicationError
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("timeout_secs must be greater than 0"));
    }

    #[test]
    fn test_oversized_timeout_validation_error() {
        let dir = TempDir::new().unwrap();

        write_config(
            &dir.path().join(CONFIG_FILENAME),
            "timeout_secs: 18446744073709551615\n",
        );

        let output = cargo_bin_cmd!("depgraph-sbom")
            .current_dir(dir.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3)); // ApplicationError
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("timeout_secs must be at most 86400 seconds"));
        assert!(!stderr.contains("panicked"));
    }

    #[test]
    fn test_explicit_config_not_found_error() {
        let dir = TempDir::new().unwrap();

        let missing_config = dir.path().join("does-not-exist.yml");

        let output = cargo_bin_cmd!("depgraph-sbom")
            .args(["-c", missing_config.to_str().unwrap()])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3)); // ApplicationError
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to read config file"));
    }
}
