use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use depgraph_sbom::adapters::outbound::network::HttpSbomClient;
use depgraph_sbom::application::dto::FetchSbomRequest;
use depgraph_sbom::config::{ConfigFile, MAX_TIMEOUT_SECS};
use depgraph_sbom::ports::outbound::SbomSubject;
use depgraph_sbom::sbom_retrieval::domain::SbomFormat;
use depgraph_sbom::sbom_retrieval::policies::RetryPolicy;
use depgraph_sbom::shared::error::SbomError;
use depgraph_sbom::shared::Result;

/// Retrieve an SBOM for a dependency graph from the SBOM service
#[derive(Parser, Debug)]
#[command(name = "depgraph-sbom")]
#[command(version)]
#[command(about = "Retrieve an SBOM for a dependency graph from the SBOM service", long_about = None)]
pub struct Args {
    /// Organization that owns the dependency graph
    #[arg(long, value_name = "ORG_ID")]
    pub org: Option<String>,

    /// Project the dependency graph belongs to
    #[arg(long, value_name = "PROJECT_ID")]
    pub project: Option<String>,

    /// SBOM format: cyclonedx1.4+json, cyclonedx1.5+json, cyclonedx1.6+json,
    /// spdx2.3+json (aliases: cyclonedx, cdx, spdx)
    #[arg(short, long)]
    pub format: Option<SbomFormat>,

    /// Dependency graph JSON file to send with the request
    #[arg(short = 'g', long = "dep-graph", value_name = "FILE")]
    pub dep_graph: Option<PathBuf>,

    /// Name of the component the SBOM describes
    #[arg(long, requires = "subject_version")]
    pub subject_name: Option<String>,

    /// Version of the component the SBOM describes
    #[arg(long, requires = "subject_name")]
    pub subject_version: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base URL of the SBOM service
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Overall timeout in seconds, retries included
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Timeout in seconds for each attempt (defaults to the overall timeout
    /// split evenly across attempts)
    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Maximum number of retries for transient failures
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Config file path (defaults to ./depgraph-sbom.config.yml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything needed for one run, after CLI flags and config are merged
#[derive(Debug)]
pub struct RunOptions {
    pub api_url: String,
    pub timeout: Duration,
    pub request_timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub output: Option<PathBuf>,
    pub request: FetchSbomRequest,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Merges flags with the config file. Flags win; built-in defaults fill
    /// whatever neither provides.
    pub fn resolve(self, config: ConfigFile) -> Result<RunOptions> {
        let format = match (self.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(name)) => name
                .parse()
                .map_err(|message: String| SbomError::Validation { message })?,
            (None, None) => SbomFormat::default(),
        };

        let timeout = timeout_from_secs(
            "timeout",
            self.timeout
                .or(config.timeout_secs)
                .unwrap_or(HttpSbomClient::DEFAULT_TIMEOUT.as_secs()),
        )?;

        let retry_policy = RetryPolicy::new(
            self.retries
                .or(config.max_retries)
                .unwrap_or(RetryPolicy::DEFAULT_MAX_RETRIES),
            config
                .retry_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(RetryPolicy::DEFAULT_BASE_DELAY),
        );

        let request_timeout = match self.request_timeout.or(config.request_timeout_secs) {
            Some(secs) => timeout_from_secs("request timeout", secs)?,
            None => retry_policy.attempt_timeout(timeout),
        };

        let mut request = FetchSbomRequest::new(
            self.org.or(config.org_id).unwrap_or_default(),
            self.project.or(config.project_id).unwrap_or_default(),
            format,
        );
        if let Some(path) = self.dep_graph {
            request = request.with_dep_graph_path(path);
        }
        if let (Some(name), Some(version)) = (self.subject_name, self.subject_version) {
            request = request.with_subject(SbomSubject::new(name, version));
        }

        Ok(RunOptions {
            api_url: self
                .api_url
                .or(config.api_url)
                .unwrap_or_else(|| HttpSbomClient::DEFAULT_API_URL.to_string()),
            timeout,
            request_timeout,
            retry_policy,
            output: self.output,
            request,
        })
    }

    /// Default tracing filter for the requested verbosity
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "depgraph_sbom=debug,warn",
            _ => "depgraph_sbom=trace,reqwest=debug,info",
        }
    }
}

fn timeout_from_secs(name: &str, secs: u64) -> Result<Duration> {
    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(SbomError::Validation {
            message: format!(
                "{} must be between 1 and {} seconds, got {}",
                name, MAX_TIMEOUT_SECS, secs
            ),
        }
        .into());
    }
    Ok(Duration::from_secs(secs))
}
