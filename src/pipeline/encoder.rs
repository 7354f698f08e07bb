// SPDX-License-Identifier: GPL-3.0-only

//! H.264 encoder selection
//!
//! Hardware encoders are probed in priority order with a software fallback
//! for installations without a vendor element. Each encoder family takes its
//! bitrate through differently named and typed properties, so configuration
//! is a per-element match.

use crate::errors::{RecorderError, RecorderResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, info, warn};

/// H.264 encoder candidates in priority order (hardware first)
const ENCODER_CANDIDATES: [(&str, bool); 8] = [
    // TI Ducati (DRA7xx / OMAP)
    ("ducatih264enc", true),
    // Generic V4L2 mem-to-mem encoders
    ("v4l2h264enc", true),
    // VA-API (old and new plugin styles)
    ("vaapih264enc", true),
    ("vah264enc", true),
    // NVIDIA NVENC
    ("nvh264enc", true),
    // Intel QSV
    ("qsvh264enc", true),
    // Software fallbacks
    ("x264enc", false),
    ("openh264enc", false),
];

/// Selected H.264 encoder element
pub struct SelectedEncoder {
    /// The encoder element, configured for the requested bitrate
    pub encoder: gst::Element,
    /// Factory name of the selected element
    pub element_name: &'static str,
    /// Whether the selected encoder is hardware accelerated
    pub is_hardware: bool,
}

/// Select the best available H.264 encoder
///
/// # Arguments
/// * `bitrate_kbps` - Target encoding bitrate in kbps
///
/// # Returns
/// * `Ok(SelectedEncoder)` - Selected and configured encoder
/// * `Err(RecorderError)` - No H.264 encoder is available
pub fn select_h264_encoder(bitrate_kbps: u32) -> RecorderResult<SelectedEncoder> {
    for (element_name, is_hardware) in ENCODER_CANDIDATES {
        if let Ok(encoder) = gst::ElementFactory::make(element_name)
            .name("h264_encoder")
            .build()
        {
            if is_hardware {
                info!(encoder = %element_name, bitrate = bitrate_kbps, "Selected hardware H.264 encoder");
            } else {
                warn!(
                    encoder = %element_name,
                    "No hardware H.264 encoder available, falling back to software"
                );
            }

            configure_encoder(&encoder, element_name, bitrate_kbps);

            return Ok(SelectedEncoder {
                encoder,
                element_name,
                is_hardware,
            });
        }
    }

    Err(RecorderError::Element(
        "no H.264 encoder available; install a vendor plugin or gst-plugins-ugly (x264enc)"
            .to_string(),
    ))
}

/// Create the H.264 stream parser needed in front of the muxer
pub fn create_parser() -> RecorderResult<gst::Element> {
    gst::ElementFactory::make("h264parse")
        .name("h264_parser")
        .build()
        .map_err(|e| RecorderError::Element(format!("failed to create h264parse: {}", e)))
}

/// Configure encoder bitrate based on element type
fn configure_encoder(encoder: &gst::Element, element_name: &str, bitrate_kbps: u32) {
    match element_name {
        // Ducati takes a signed kbps bitrate
        "ducatih264enc" => {
            encoder.set_property("bitrate", bitrate_kbps as i32);
            debug!("Configured ducatih264enc: bitrate={} kbps", bitrate_kbps);
        }

        // V4L2 encoders take rate controls through extra-controls; defaults apply
        "v4l2h264enc" => {
            debug!("Using v4l2h264enc with default configuration");
        }

        // VA-API encoders, old plugin style (integer rate-control)
        "vaapih264enc" => {
            encoder.set_property("rate-control", 2); // CBR
            encoder.set_property("bitrate", bitrate_kbps);
            debug!("Configured vaapih264enc: bitrate={} kbps", bitrate_kbps);
        }

        // VA-API encoders, new plugin style (string rate-control)
        "vah264enc" => {
            encoder.set_property_from_str("rate-control", "cbr");
            encoder.set_property("bitrate", bitrate_kbps);
            debug!("Configured vah264enc: bitrate={} kbps", bitrate_kbps);
        }

        "nvh264enc" => {
            encoder.set_property("bitrate", bitrate_kbps);
            encoder.set_property_from_str("rc-mode", "cbr");
            debug!("Configured nvh264enc: bitrate={} kbps", bitrate_kbps);
        }

        "qsvh264enc" => {
            encoder.set_property("bitrate", bitrate_kbps);
            debug!("Configured qsvh264enc: bitrate={} kbps", bitrate_kbps);
        }

        "x264enc" => {
            encoder.set_property_from_str("tune", "zerolatency");
            encoder.set_property("bitrate", bitrate_kbps);
            debug!("Configured x264enc: bitrate={} kbps", bitrate_kbps);
        }

        // OpenH264 takes bits per second
        "openh264enc" => {
            encoder.set_property_from_str("rate-control", "bitrate");
            encoder.set_property_from_str("usage-type", "camera");
            encoder.set_property("bitrate", bitrate_kbps * 1000);
            debug!("Configured openh264enc: bitrate={} bps", bitrate_kbps * 1000);
        }

        _ => {
            debug!("Unknown encoder type, using default configuration");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_candidates_precede_software() {
        let first_software = ENCODER_CANDIDATES
            .iter()
            .position(|(_, hw)| !hw)
            .expect("table should carry a software fallback");
        assert!(
            ENCODER_CANDIDATES[first_software..]
                .iter()
                .all(|(_, hw)| !hw),
            "Hardware encoders must precede every software fallback"
        );
    }

    #[test]
    fn test_ducati_has_top_priority() {
        assert_eq!(ENCODER_CANDIDATES[0].0, "ducatih264enc");
    }
}
