//! Error types for YantraIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// YantraIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Device fault reported by the platform
    #[error("Device fault: {0}")]
    Device(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
