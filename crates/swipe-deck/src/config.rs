//! Deck configuration.
//!
//! A [`DeckConfig`] describes the environment a deck is mounted in. It can
//! be built in code or loaded from TOML:
//!
//! ```
//! use swipe_deck::DeckConfig;
//!
//! let config = DeckConfig::from_toml_str(r#"
//! viewport_width = 390.0
//! layout_animation = false
//! "#)?;
//! assert_eq!(config.swipe_threshold(), 97.5);
//! # Ok::<(), swipe_deck::DeckError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use swipe_deck_core::logging::targets;

use crate::constants::swipe_threshold;
use crate::error::{DeckError, DeckResult};

/// Environment a deck is mounted in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Width of the window the deck fills, in logical pixels.
    pub viewport_width: f32,
    /// Slide the remaining stack smoothly into place after a card departs.
    pub layout_animation: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            layout_animation: true,
        }
    }
}

impl DeckConfig {
    /// A configuration for a viewport of the given width.
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Set the viewport width using builder pattern.
    pub fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Enable or disable layout animation using builder pattern.
    pub fn with_layout_animation(mut self, enabled: bool) -> Self {
        self.layout_animation = enabled;
        self
    }

    /// Horizontal distance a drag must exceed to count as a swipe.
    pub fn swipe_threshold(&self) -> f32 {
        swipe_threshold(self.viewport_width)
    }

    /// Check that the configuration can drive a deck.
    pub fn validate(&self) -> DeckResult<()> {
        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            return Err(DeckError::InvalidViewportWidth(self.viewport_width));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> DeckResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded deck configuration");
        Ok(config)
    }
}
