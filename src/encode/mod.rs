//! Frame encoding sinks.
//!
//! A sink consumes submitted frames on the producer's thread (encode cost
//! included) and defers disk I/O to a writer behind a [`sink::SinkHandle`].

/// PNG frame encoder.
pub mod png;
/// Frame sink abstractions.
pub mod sink;
