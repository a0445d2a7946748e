//! depgraph-sbom - SBOM retrieval for dependency graphs
//!
//! This library provides a client abstraction for fetching a Software Bill of
//! Materials (SBOM) generated from a dependency graph, together with an HTTP
//! implementation and a scriptable mock for tests. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_retrieval`): Formats, identifiers and retry policy
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure, including [`SbomClient`](ports::outbound::SbomClient)
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Call context, common utilities and error types
//! - **Testing** (`testing`): [`MockSbomClient`](testing::MockSbomClient) and its controller
//!
//! # Example
//!
//! ```no_run
//! use depgraph_sbom::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let http_client = HttpSbomClient::new(HttpSbomClient::DEFAULT_API_URL, Duration::from_secs(30))?;
//! let sbom_client = RetryingSbomClient::new(http_client, RetryPolicy::default());
//! let dep_graph_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = FetchSbomUseCase::new(sbom_client, dep_graph_reader, progress_reporter);
//!
//! // Execute
//! let ctx = CallContext::background().with_timeout(Duration::from_secs(30));
//! let request = FetchSbomRequest::new("acme-corp", "widget-service", SbomFormat::Spdx23Json);
//! let response = use_case.execute(&ctx, request).await?;
//!
//! println!("{}", response.result.document);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_retrieval;
pub mod shared;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{HttpSbomClient, RetryingSbomClient};
    pub use crate::application::dto::{FetchSbomRequest, FetchSbomResponse};
    pub use crate::application::use_cases::FetchSbomUseCase;
    pub use crate::ports::outbound::{
        DepGraphReader, GetSbomForDepGraphRequest, GetSbomForDepGraphResult, OutputPresenter,
        ProgressReporter, SbomClient, SbomSubject,
    };
    pub use crate::sbom_retrieval::domain::{DepGraphLocator, SbomFormat};
    pub use crate::sbom_retrieval::policies::RetryPolicy;
    pub use crate::shared::{CallContext, Result};
}
