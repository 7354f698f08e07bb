// SPDX-License-Identifier: GPL-3.0-only

//! CLI entrypoint for a recording run
//!
//! Validates the parsed configuration, initializes GStreamer, and drives the
//! recorder to completion.

use grecord::config::RecorderConfig;
use grecord::pipeline::{Recorder, RunOutcome};

/// Record from the configured camera until EOS, error, or Ctrl+C
pub fn record(config: RecorderConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Reject bad flags before any resource is allocated
    config.validate()?;

    // Initialize GStreamer
    gstreamer::init()?;

    println!(
        "camera: {} resolution {}x{}, format={}, bitrate={} kbps",
        config.device, config.width, config.height, config.pixel_format, config.bitrate_kbps
    );

    let recorder = Recorder::new(&config)?;

    if let Some(path) = recorder.output_path() {
        println!("Output: {}", path.display());
    }
    println!("Recording... (press Ctrl+C to stop)");

    let outcome = recorder.run()?;

    match outcome {
        RunOutcome::EndOfStream => println!("End of stream reached."),
        RunOutcome::Interrupted => println!("Recording interrupted."),
    }
    if let Some(path) = recorder.output_path() {
        println!("Recording saved: {}", path.display());
    }

    Ok(())
}
