mod cli;

use anyhow::Context;
use cli::{Args, RunOptions};
use depgraph_sbom::adapters::outbound::console::StderrProgressReporter;
use depgraph_sbom::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use depgraph_sbom::adapters::outbound::network::{HttpSbomClient, RetryingSbomClient};
use depgraph_sbom::application::use_cases::FetchSbomUseCase;
use depgraph_sbom::config::{self, ConfigFile};
use depgraph_sbom::ports::outbound::OutputPresenter;
use depgraph_sbom::shared::error::{ExitCode, SbomError};
use depgraph_sbom::shared::{CallContext, Result};
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = init_log(args.log_directive()) {
        eprintln!("⚠️  Warning: {}", e);
    }

    if let Err(e) = run(args).await {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\n{} {}", "Caused by:".yellow(), cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

fn init_log(default_directive: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("error initializing logging")?;

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let options = args.resolve(config)?;
    tracing::debug!(?options, "Resolved options");

    let RunOptions {
        api_url,
        timeout,
        request_timeout,
        retry_policy,
        output,
        request,
    } = options;

    // Create adapters (Dependency Injection)
    let sbom_client = RetryingSbomClient::new(
        HttpSbomClient::new(api_url, request_timeout)?,
        retry_policy,
    );
    let dep_graph_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();

    let use_case = FetchSbomUseCase::new(sbom_client, dep_graph_reader, progress_reporter);

    // The root context is cancelled by Ctrl-C; the overall timeout covers retries,
    // each attempt is bounded by the client's request timeout
    let root = CallContext::background();
    let ctx = root.with_timeout(timeout);
    let interrupt = tokio::spawn(cancel_on_interrupt(root));

    let outcome = use_case.execute(&ctx, request).await;
    interrupt.abort();
    let response = outcome?;

    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&response.result.document)?;

    Ok(())
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    let config = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    Ok(config.unwrap_or_default())
}

async fn cancel_on_interrupt(ctx: CallContext) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!(trace_id = %ctx.trace_id(), "Interrupted, cancelling SBOM request");
        ctx.cancel();
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<SbomError>() {
        Some(SbomError::Cancelled { .. }) => ExitCode::Interrupted,
        _ => ExitCode::ApplicationError,
    }
}
