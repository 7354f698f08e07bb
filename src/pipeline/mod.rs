// SPDX-License-Identifier: GPL-3.0-only

//! Pipeline construction and supervision
//!
//! Everything hard (capture threads, buffer scheduling, caps negotiation,
//! clocking) lives inside GStreamer. These modules only instantiate named
//! elements, set properties, link them, and watch the bus.

pub mod drain;
pub mod elements;
pub mod encoder;
pub mod muxer;
pub mod recorder;

pub use recorder::{Recorder, RunOutcome};
