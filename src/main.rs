// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use grecord::config::{RecorderConfig, SinkMode};
use grecord::constants::DEFAULT_FRAMERATE;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "grecord")]
#[command(about = "Records a V4L2 camera to an H.264 file through a hardware pipeline")]
#[command(version)]
struct Args {
    /// Video capture device (e.g. /dev/video0)
    #[arg(short = 'D', long)]
    device: String,

    /// Picture width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Picture height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Camera fourcc code (e.g. NV12, YUY2)
    #[arg(short = 'F', long)]
    format: String,

    /// Encoding bitrate in kbps
    #[arg(short = 'B', long)]
    bitrate: u32,

    /// Capture framerate in frames per second
    #[arg(long, default_value_t = DEFAULT_FRAMERATE)]
    framerate: u32,

    /// Output file path (default: ~/Videos/Recordings/recording_TIMESTAMP.mp4)
    #[arg(short = 'O', long)]
    output: Option<PathBuf>,

    /// Drain encoded buffers to the application instead of writing a file (debug)
    #[arg(long)]
    drain: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=grecord=debug, RUST_LOG=warn
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args = Args::parse();

    let config = RecorderConfig {
        device: args.device,
        width: args.width,
        height: args.height,
        pixel_format: args.format,
        framerate: args.framerate,
        bitrate_kbps: args.bitrate,
        output: args.output,
        sink_mode: if args.drain {
            SinkMode::Drain
        } else {
            SinkMode::File
        },
    };

    cli::record(config)
}
