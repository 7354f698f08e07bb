// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the configuration boundary

use grecord::{RecorderConfig, SinkMode};
use std::path::PathBuf;

fn base_config() -> RecorderConfig {
    RecorderConfig {
        device: "/dev/video0".to_string(),
        width: 1920,
        height: 1080,
        pixel_format: "NV12".to_string(),
        framerate: 30,
        bitrate_kbps: 8000,
        output: Some(PathBuf::from("/tmp/recording.mp4")),
        sink_mode: SinkMode::File,
    }
}

#[test]
fn test_complete_config_accepted() {
    assert!(
        base_config().validate().is_ok(),
        "A fully specified config should pass validation"
    );
}

#[test]
fn test_non_positive_dimensions_rejected() {
    for (width, height) in [(0, 1080), (1920, 0), (0, 0)] {
        let config = RecorderConfig {
            width,
            height,
            ..base_config()
        };
        assert!(
            config.validate().is_err(),
            "{}x{} should be rejected",
            width,
            height
        );
    }
}

#[test]
fn test_missing_device_rejected() {
    let config = RecorderConfig {
        device: String::new(),
        ..base_config()
    };
    assert!(config.validate().is_err(), "Empty device should be rejected");
}

#[test]
fn test_missing_format_rejected() {
    let config = RecorderConfig {
        pixel_format: String::new(),
        ..base_config()
    };
    assert!(
        config.validate().is_err(),
        "Empty pixel format should be rejected"
    );
}

#[test]
fn test_drain_mode_needs_no_output() {
    let config = RecorderConfig {
        output: None,
        sink_mode: SinkMode::Drain,
        ..base_config()
    };
    assert!(
        config.validate().is_ok(),
        "Drain mode without an output path should pass validation"
    );
}
