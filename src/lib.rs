// SPDX-License-Identifier: GPL-3.0-only

//! grecord - records a V4L2 camera to an H.264 file through a fixed
//! hardware GStreamer pipeline.
//!
//! The pipeline is capture source -> hardware converter -> hardware H.264
//! encoder -> MP4 muxer -> file sink. A debug variant replaces the muxed
//! file tail with an appsink that drains the encoded buffers to a callback.
//! All buffer scheduling, threading, and caps negotiation happens inside
//! GStreamer; this crate declares the element graph, sets a handful of
//! properties, and interprets the bus message stream until end-of-stream,
//! error, or SIGINT.
//!
//! # Architecture
//!
//! - [`config`]: parsed command-line configuration and validation
//! - [`pipeline`]: element graph construction, bus handling, and sinks
//! - [`errors`]: crate-wide error type
//! - [`constants`]: element names and defaults

pub mod config;
pub mod constants;
pub mod errors;
pub mod pipeline;

// Re-export commonly used types
pub use config::{RecorderConfig, SinkMode};
pub use errors::{RecorderError, RecorderResult};
pub use pipeline::recorder::{Recorder, RunOutcome};
