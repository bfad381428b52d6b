//! Error types for the hero-core library

use thiserror::Error;

/// Main error type for hero operations
///
/// The animation engine itself never fails: missing elements are skipped.
/// Errors only surface at the edges, when configuration is loaded or
/// validated.
#[derive(Error, Debug)]
pub enum HeroError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid content: {0}")]
    Content(String),
}

/// Result type alias for hero operations
pub type Result<T> = std::result::Result<T, HeroError>;

impl PartialEq for HeroError {
    fn eq(&self, other: &Self) -> bool {
        match self {
            HeroError::Io(err) => {
                matches!(other, HeroError::Io(e) if err.to_string() == e.to_string())
            }
            HeroError::Serialization(err) => {
                matches!(other, HeroError::Serialization(e) if err.to_string() == e.to_string())
            }
            HeroError::Configuration(msg) => {
                matches!(other, HeroError::Configuration(o) if msg == o)
            }
            HeroError::Content(msg) => {
                matches!(other, HeroError::Content(o) if msg == o)
            }
        }
    }
}
