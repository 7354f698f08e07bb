// SPDX-License-Identifier: GPL-3.0-only

//! Recorder configuration parsed from the command line
//!
//! The configuration is the only state this program owns besides the
//! pipeline handles. It is constructed once at startup, validated before any
//! GStreamer resource is allocated, and referenced for the lifetime of the
//! process.

use crate::constants::DEFAULT_SAVE_FOLDER;
use crate::errors::{RecorderError, RecorderResult};
use chrono::Local;
use std::path::PathBuf;

/// Where the encoded stream ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkMode {
    /// Parse, mux, and write to a file (default)
    #[default]
    File,
    /// Drain encoded buffers to an application callback (debug variant)
    Drain,
}

/// Recorder settings for a single run
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Video capture device path (e.g. /dev/video0)
    pub device: String,
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// Raw pixel format fourcc (e.g. "NV12", "YUY2")
    pub pixel_format: String,
    /// Capture framerate in frames per second
    pub framerate: u32,
    /// Target encoding bitrate in kbps
    pub bitrate_kbps: u32,
    /// Output file path; when `None` a timestamped default is used
    pub output: Option<PathBuf>,
    /// Sink variant for the pipeline tail
    pub sink_mode: SinkMode,
}

impl RecorderConfig {
    /// Check the configuration before any resource is allocated.
    ///
    /// Width, height, framerate, and bitrate are unsigned at the type level,
    /// so "positive" reduces to a non-zero check here. String flags must be
    /// non-empty, including an explicitly given output path.
    pub fn validate(&self) -> RecorderResult<()> {
        if self.device.is_empty() {
            return Err(RecorderError::Config("device must not be empty".into()));
        }
        if self.width == 0 {
            return Err(RecorderError::Config("width must be positive".into()));
        }
        if self.height == 0 {
            return Err(RecorderError::Config("height must be positive".into()));
        }
        if self.pixel_format.is_empty() {
            return Err(RecorderError::Config(
                "pixel format must not be empty".into(),
            ));
        }
        if self.framerate == 0 {
            return Err(RecorderError::Config("framerate must be positive".into()));
        }
        if self.bitrate_kbps == 0 {
            return Err(RecorderError::Config("bitrate must be positive".into()));
        }
        if let Some(path) = &self.output
            && path.as_os_str().is_empty()
        {
            return Err(RecorderError::Config(
                "output path must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the output file path, falling back to a timestamped file in
    /// the default video directory when none was given.
    pub fn resolved_output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        default_video_dir().join(format!("recording_{}.mp4", timestamp))
    }
}

/// Default directory for recordings
fn default_video_dir() -> PathBuf {
    dirs::video_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DEFAULT_SAVE_FOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RecorderConfig {
        RecorderConfig {
            device: "/dev/video0".to_string(),
            width: 1280,
            height: 720,
            pixel_format: "NV12".to_string(),
            framerate: 30,
            bitrate_kbps: 4000,
            output: None,
            sink_mode: SinkMode::File,
        }
    }

    #[test]
    fn test_valid_config_accepted() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = RecorderConfig {
            width: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_height_rejected() {
        let config = RecorderConfig {
            height: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_bitrate_rejected() {
        let config = RecorderConfig {
            bitrate_kbps: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_framerate_rejected() {
        let config = RecorderConfig {
            framerate: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_device_rejected() {
        let config = RecorderConfig {
            device: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_format_rejected() {
        let config = RecorderConfig {
            pixel_format: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_output_rejected() {
        let config = RecorderConfig {
            output: Some(PathBuf::new()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_output_kept() {
        let config = RecorderConfig {
            output: Some(PathBuf::from("/tmp/out.mp4")),
            ..valid_config()
        };
        assert_eq!(config.resolved_output_path(), PathBuf::from("/tmp/out.mp4"));
    }

    #[test]
    fn test_default_output_path() {
        let path = valid_config().resolved_output_path();
        assert_eq!(
            path.extension().and_then(|e| e.to_str()),
            Some("mp4"),
            "Default output should be an mp4 file"
        );
        assert!(
            path.to_string_lossy().contains(DEFAULT_SAVE_FOLDER),
            "Default output should live in the save folder"
        );
    }
}
