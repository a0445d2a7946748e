/// Domain layer - Value objects and policies for SBOM retrieval
///
/// Nothing here performs I/O; adapters and use cases build on these types.
pub mod domain;
pub mod policies;
