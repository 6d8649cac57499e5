//! Error types for VyuhaMap

/// Result type alias
pub type Result<T> = std::result::Result<T, MapError>;

/// Map loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Map text contained no rows
    #[error("Map is empty")]
    Empty,

    /// Row width differs from the first row
    #[error("Map row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        /// Zero-based row index
        row: usize,
        /// Width of the offending row
        actual: usize,
        /// Width of the first row
        expected: usize,
    },

    /// Dimensions are not of the doubled-index form 2n+1
    #[error("Map dimensions {width}x{height} are not of the form 2n+1")]
    BadDimensions {
        /// Grid width in doubled units
        width: usize,
        /// Grid height in doubled units
        height: usize,
    },

    /// Unrecognized character in the map text
    #[error("Unrecognized map character {0:?}")]
    BadCharacter(char),
}
