/// Shared kernel - Cross-cutting types used by every layer
pub mod context;
pub mod error;
pub mod result;
pub mod security;

pub use context::CallContext;
pub use result::Result;
