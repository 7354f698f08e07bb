// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Name assigned to the top-level recording pipeline
pub const PIPELINE_NAME: &str = "grecord-pipeline";

/// Structure name of the application bus message posted on SIGINT
pub const INTERRUPT_MESSAGE_NAME: &str = "GrecordInterrupt";

/// Default capture framerate in frames per second
pub const DEFAULT_FRAMERATE: u32 = 30;

/// Input buffers handed to the hardware converter
pub const CONVERTER_INPUT_BUFFERS: i32 = 8;

/// Folder under the user's video directory for default output files
pub const DEFAULT_SAVE_FOLDER: &str = "Recordings";
