// SPDX-License-Identifier: GPL-3.0-only

//! MP4 muxing tail
//!
//! Creates the muxer and file sink for the default sink variant and links
//! them to the encoded video stream.

use crate::errors::{RecorderError, RecorderResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Muxer and file sink pair
pub struct MuxTail {
    /// MP4 muxer element
    pub muxer: gst::Element,
    /// File sink element
    pub filesink: gst::Element,
    /// Output file path
    pub output_path: PathBuf,
}

/// Create the MP4 muxer and file sink
pub fn create_mux_tail(output_path: PathBuf) -> RecorderResult<MuxTail> {
    info!(path = %output_path.display(), "Creating muxer");

    let muxer = gst::ElementFactory::make("mp4mux")
        .name("mp4_muxer")
        .build()
        .map_err(|e| RecorderError::Element(format!("failed to create mp4mux: {}", e)))?;

    // Non-streamable output writes the index for seekable playback
    if muxer.has_property("streamable") {
        muxer.set_property("streamable", false);
        debug!("Configured muxer with streamable=false for seekable output");
    }

    let location = output_path
        .to_str()
        .ok_or_else(|| RecorderError::Config("output path is not valid UTF-8".to_string()))?;

    let filesink = gst::ElementFactory::make("filesink")
        .name("file_sink")
        .property("location", location)
        .build()
        .map_err(|e| RecorderError::Element(format!("failed to create filesink: {}", e)))?;

    Ok(MuxTail {
        muxer,
        filesink,
        output_path,
    })
}

/// Link the parsed video stream into the muxer
pub fn link_video_to_muxer(parser: &gst::Element, muxer: &gst::Element) -> RecorderResult<()> {
    parser
        .link(muxer)
        .map_err(|_| RecorderError::Link("failed to link video stream to muxer".to_string()))?;

    debug!("Video stream linked to muxer");
    Ok(())
}

/// Link the muxer to the file sink
pub fn link_muxer_to_sink(muxer: &gst::Element, filesink: &gst::Element) -> RecorderResult<()> {
    muxer
        .link(filesink)
        .map_err(|_| RecorderError::Link("failed to link muxer to filesink".to_string()))?;

    debug!("Muxer linked to filesink");
    Ok(())
}
