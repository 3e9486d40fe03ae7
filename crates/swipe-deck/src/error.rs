//! Error types for the deck crate.
//!
//! The deck itself cannot fail at runtime; only loading a [`DeckConfig`]
//! can.
//!
//! [`DeckConfig`]: crate::DeckConfig

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a deck configuration.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The viewport width must be finite and positive.
    #[error("invalid viewport width: {0}")]
    InvalidViewportWidth(f32),

    /// The configuration text is not valid TOML for a deck configuration.
    #[error("failed to parse deck configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for deck configuration operations.
pub type DeckResult<T> = Result<T, DeckError>;
