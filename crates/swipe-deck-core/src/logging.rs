//! Logging facilities for swipe-deck.
//!
//! swipe-deck uses the `tracing` crate for instrumentation and only emits at
//! `trace` and `debug` level. Install a subscriber in your application to see
//! the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("swipe_deck=debug,swipe_deck_core=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "swipe_deck_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "swipe_deck_core::signal";
    /// Animated value target.
    pub const ANIMATION: &str = "swipe_deck_core::animation";
    /// Deck state machine target.
    pub const DECK: &str = "swipe_deck::deck";
    /// Gesture recognizer target.
    pub const GESTURE: &str = "swipe_deck::gesture";
    /// Configuration loading target.
    pub const CONFIG: &str = "swipe_deck::config";
    /// Performance span target.
    pub const PERF: &str = "swipe_deck::perf";
}

/// A guard that keeps a performance span entered until dropped.
///
/// # Example
///
/// ```
/// use swipe_deck_core::PerfSpan;
///
/// fn tick_frame() {
///     let _span = PerfSpan::new("tick");
///     // work measured by the span
/// }
/// tick_frame();
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "swipe_deck::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            tracing::trace!(target: targets::PERF, "inside span");
        });
    }
}
