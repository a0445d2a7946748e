/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (SBOM service, file system, console).
pub mod dep_graph_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_client;
pub mod sbom_exchange;

pub use dep_graph_reader::DepGraphReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_client::SbomClient;
pub use sbom_exchange::{GetSbomForDepGraphRequest, GetSbomForDepGraphResult, SbomSubject};
