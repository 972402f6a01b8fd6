//! Encoders for captured frames.
//!
//! Stills are PNG; animations stream frames in time order into a [`sink::FrameSink`].

/// Looping GIF sink built on the `image` crate.
pub(crate) mod gif;
/// PNG encode/decode of single frames.
pub(crate) mod png;
/// Generic frame sink trait and the in-memory sink.
pub(crate) mod sink;
