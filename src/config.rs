//! Configuration file support for depgraph-sbom.
//!
//! Provides YAML-based configuration through `depgraph-sbom.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::sbom_retrieval::domain::SbomFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depgraph-sbom.config.yml";

/// Upper bound for any timeout setting (one day).
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Top-level configuration file schema.
///
/// Every field is optional; CLI flags take precedence over file values.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub org_id: Option<String>,
    pub project_id: Option<String>,
    pub format: Option<String>,
    pub timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref api_url) = config.api_url {
        if api_url.trim().is_empty() {
            bail!(
                "Invalid config: api_url must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default endpoint, or set a full URL (e.g., \"https://sbom.example.com/rest\")."
            );
        }
    }

    validate_timeout(
        "timeout_secs",
        config.timeout_secs,
        "The timeout bounds the whole SBOM request, including retries.",
    )?;
    validate_timeout(
        "request_timeout_secs",
        config.request_timeout_secs,
        "The request timeout bounds a single attempt; each retry gets a fresh one.",
    )?;

    if let Some(ref format) = config.format {
        SbomFormat::from_str(format).map_err(|e| {
            anyhow::anyhow!(
                "Invalid config: format '{}' is not supported.\n\n💡 Hint: {}",
                format,
                e
            )
        })?;
    }

    Ok(())
}

fn validate_timeout(field: &str, value: Option<u64>, hint: &str) -> Result<()> {
    match value {
        Some(0) => bail!(
            "Invalid config: {} must be greater than 0.\n\n💡 Hint: {}",
            field,
            hint
        ),
        Some(secs) if secs > MAX_TIMEOUT_SECS => bail!(
            "Invalid config: {} must be at most {} seconds.\n\n💡 Hint: {}",
            field,
            MAX_TIMEOUT_SECS,
            hint
        ),
        _ => Ok(()),
    }
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::debug!(field = %key, "Ignoring unknown config field");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
