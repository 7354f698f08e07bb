// SPDX-License-Identifier: GPL-3.0-only

//! Element construction helpers
//!
//! Capture source and hardware converter creation, plus the small generic
//! helpers the rest of the pipeline uses.

use crate::constants::CONVERTER_INPUT_BUFFERS;
use crate::errors::{RecorderError, RecorderResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, info};

/// Converter candidates in priority order (hardware first)
///
/// The TI VPE comes first where present; v4l2convert covers other SoCs with
/// a mem-to-mem conversion engine; videoconvert is the software fallback.
const CONVERTER_CANDIDATES: [(&str, bool); 3] = [
    ("vpe", true),
    ("v4l2convert", true),
    ("videoconvert", false),
];

/// Create a named element from a factory
pub fn make_element(factory: &str, name: &str) -> RecorderResult<gst::Element> {
    gst::ElementFactory::make(factory)
        .name(name)
        .build()
        .map_err(|e| RecorderError::Element(format!("failed to create {}: {}", factory, e)))
}

/// Create a named queue element
pub fn create_queue(name: &str) -> RecorderResult<gst::Element> {
    make_element("queue", name)
}

/// Create the V4L2 capture source
///
/// The source captures in dmabuf io-mode so frames reach the hardware
/// converter without a copy.
pub fn create_capture_source(device: &str) -> RecorderResult<gst::Element> {
    let source = gst::ElementFactory::make("v4l2src")
        .name("video_source")
        .property("device", device)
        .property_from_str("io-mode", "dmabuf")
        .build()
        .map_err(|e| RecorderError::Element(format!("failed to create v4l2src: {}", e)))?;

    debug!(device = %device, "Created capture source");
    Ok(source)
}

/// Create the scaler/format converter stage
///
/// Probes the candidate table and takes the first converter the GStreamer
/// installation can instantiate.
pub fn create_converter() -> RecorderResult<gst::Element> {
    for (factory, is_hardware) in CONVERTER_CANDIDATES {
        if let Ok(converter) = gst::ElementFactory::make(factory)
            .name("video_converter")
            .build()
        {
            info!(
                converter = %factory,
                hardware = is_hardware,
                "Selected video converter"
            );

            if converter.has_property("num-input-buffers") {
                converter.set_property("num-input-buffers", CONVERTER_INPUT_BUFFERS);
                debug!(
                    buffers = CONVERTER_INPUT_BUFFERS,
                    "Configured converter input buffer count"
                );
            }

            return Ok(converter);
        }
    }

    Err(RecorderError::Element(
        "no video converter available".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_candidates_hardware_first() {
        let first_software = CONVERTER_CANDIDATES
            .iter()
            .position(|(_, hw)| !hw)
            .unwrap_or(CONVERTER_CANDIDATES.len());
        assert!(
            CONVERTER_CANDIDATES[first_software..]
                .iter()
                .all(|(_, hw)| !hw),
            "Hardware converters must precede the software fallback"
        );
    }
}
