// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the recorder
//!
//! Every failure mode in this program is terminal: errors propagate with `?`
//! up to `main`, which prints the message and exits with a non-zero status.

use std::fmt;

/// Result type alias using RecorderError
pub type RecorderResult<T> = Result<T, RecorderError>;

/// Main recorder error type
#[derive(Debug, Clone)]
pub enum RecorderError {
    /// Invalid command-line configuration
    Config(String),
    /// GStreamer initialization failed
    Init(String),
    /// Failed to create a pipeline element
    Element(String),
    /// Failed to link two pipeline elements
    Link(String),
    /// Failed to change the pipeline state
    StateChange(String),
    /// Error reported on the pipeline message bus
    Pipeline(String),
    /// Failed to install the interrupt handler
    Signal(String),
    /// Filesystem error
    Storage(String),
}

impl fmt::Display for RecorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecorderError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            RecorderError::Init(msg) => write!(f, "GStreamer initialization failed: {}", msg),
            RecorderError::Element(msg) => write!(f, "Element creation failed: {}", msg),
            RecorderError::Link(msg) => write!(f, "Element link failed: {}", msg),
            RecorderError::StateChange(msg) => write!(f, "State change failed: {}", msg),
            RecorderError::Pipeline(msg) => write!(f, "Pipeline error: {}", msg),
            RecorderError::Signal(msg) => write!(f, "Signal handler error: {}", msg),
            RecorderError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for RecorderError {}

impl From<gstreamer::glib::Error> for RecorderError {
    fn from(err: gstreamer::glib::Error) -> Self {
        RecorderError::Init(err.to_string())
    }
}

impl From<gstreamer::glib::BoolError> for RecorderError {
    fn from(err: gstreamer::glib::BoolError) -> Self {
        RecorderError::Link(err.to_string())
    }
}

impl From<gstreamer::StateChangeError> for RecorderError {
    fn from(err: gstreamer::StateChangeError) -> Self {
        RecorderError::StateChange(err.to_string())
    }
}

impl From<std::io::Error> for RecorderError {
    fn from(err: std::io::Error) -> Self {
        RecorderError::Storage(err.to_string())
    }
}

impl From<ctrlc::Error> for RecorderError {
    fn from(err: ctrlc::Error) -> Self {
        RecorderError::Signal(err.to_string())
    }
}
