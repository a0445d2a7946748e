/// Type alias for Result with anyhow::Error as the error type.
///
/// The client port exposes one undifferentiated error; concrete
/// causes travel inside as `SbomError` and can be recovered with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
