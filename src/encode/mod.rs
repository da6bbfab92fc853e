//! Encoding sinks.
//!
//! Sinks consume composed frames in emission order and are driven by the animation sequencer.

/// Animated GIF sink writing to any byte transport.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
