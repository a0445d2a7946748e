/// Mock implementations for testing
mod mock_dep_graph_reader;
mod mock_progress_reporter;

pub use mock_dep_graph_reader::MockDepGraphReader;
pub use mock_progress_reporter::MockProgressReporter;
