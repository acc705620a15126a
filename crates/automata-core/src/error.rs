//! Error types for the automaton engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid grid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Unknown rule selector {selector} for {model} (available: 0..{available})")]
    UnknownRuleSelector {
        model: &'static str,
        selector: usize,
        available: usize,
    },

    #[error("Rule code {0} is outside 0..=255")]
    RuleCodeOutOfRange(u32),

    #[error("Seed mode {0} is not supported (expected 0 or 1)")]
    InvalidSeedMode(u8),

    #[error("Power must be positive, got {0}")]
    InvalidPower(u32),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the error came from rejected construction parameters.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Serialization(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
