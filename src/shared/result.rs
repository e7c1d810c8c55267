use crate::shared::error::BomError;

/// Type alias for Result with anyhow::Error as the error type.
/// This provides a consistent error handling pattern across the adapters and application layer.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result type returned by the analysis engine.
///
/// Engine operations surface typed errors so callers can map each
/// [`ErrorKind`](crate::shared::error::ErrorKind) to their own status codes.
pub type EngineResult<T> = std::result::Result<T, BomError>;
