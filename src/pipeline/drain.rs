// SPDX-License-Identifier: GPL-3.0-only

//! Debug drain sink
//!
//! Replaces the muxed file tail with an appsink that hands every encoded
//! buffer to an application callback. Used to inspect the raw encoder output
//! without touching the filesystem.

use crate::errors::{RecorderError, RecorderResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use tracing::debug;

/// Number of leading bytes shown when logging a drained buffer
const PREVIEW_BYTES: usize = 10;

/// Create an appsink that drains encoded H.264 buffers to `on_buffer`
///
/// The sink runs unsynchronized so the encoder is never throttled by the
/// clock while debugging.
pub fn create_drain_sink<F>(mut on_buffer: F) -> RecorderResult<gst_app::AppSink>
where
    F: FnMut(&[u8]) + Send + 'static,
{
    let appsink = gst::ElementFactory::make("appsink")
        .name("app_sink")
        .build()
        .map_err(|e| RecorderError::Element(format!("failed to create appsink: {}", e)))?
        .dynamic_cast::<gst_app::AppSink>()
        .map_err(|_| RecorderError::Element("failed to cast to AppSink".to_string()))?;

    let caps = gst::Caps::builder("video/x-h264").build();
    appsink.set_caps(Some(&caps));
    appsink.set_property("sync", false);

    appsink.set_callbacks(
        gst_app::AppSinkCallbacks::builder()
            .new_sample(move |sink| {
                let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                if let Some(buffer) = sample.buffer()
                    && let Ok(map) = buffer.map_readable()
                {
                    on_buffer(map.as_slice());
                }
                Ok(gst::FlowSuccess::Ok)
            })
            .build(),
    );

    Ok(appsink)
}

/// Default drain callback: log the buffer size and a leading-byte preview
pub fn log_encoded_buffer(data: &[u8]) {
    debug!(
        size = data.len(),
        head = %head_hex(data, PREVIEW_BYTES),
        "Drained encoded buffer"
    );
}

/// Render the first `n` bytes of a buffer as space-separated hex
fn head_hex(data: &[u8], n: usize) -> String {
    data.iter()
        .take(n)
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_hex_truncates() {
        assert_eq!(head_hex(&[0x00, 0x00, 0x01, 0x67], 3), "00 00 01");
    }

    #[test]
    fn test_head_hex_short_buffer() {
        assert_eq!(head_hex(&[0xff], 10), "ff");
        assert_eq!(head_hex(&[], 10), "");
    }
}
