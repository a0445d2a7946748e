pub mod dep_graph_locator;
pub mod sbom_format;

pub use dep_graph_locator::DepGraphLocator;
pub use sbom_format::SbomFormat;
