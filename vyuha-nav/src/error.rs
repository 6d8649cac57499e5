//! Error types for VyuhaNav

use thiserror::Error;

/// VyuhaNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Map error: {0}")]
    Map(#[from] vyuha_map::MapError),

    #[error("Platform error: {0}")]
    Platform(#[from] yantra_io::Error),

    #[error("Motion primitive exceeded its tick budget of {0} ticks")]
    MotionTimeout(u32),

    #[error("No hypothesis matches the observed walls")]
    LocalizationFailed,

    #[error("Solver exceeded the iteration limit of {0}")]
    IterationLimit(u32),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
