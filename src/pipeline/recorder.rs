// SPDX-License-Identifier: GPL-3.0-only

//! Recording pipeline
//!
//! Builds the fixed capture -> convert -> encode -> sink graph, drives it to
//! Playing, and interprets the bus message stream until end-of-stream,
//! error, or SIGINT. The bus is polled synchronously; the only asynchronous
//! trigger is the SIGINT handler, which asks the pipeline to shut down
//! gracefully by sending EOS instead of killing it.

use super::{drain, elements, encoder, muxer};
use crate::config::{RecorderConfig, SinkMode};
use crate::constants::{INTERRUPT_MESSAGE_NAME, PIPELINE_NAME};
use crate::errors::{RecorderError, RecorderResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// How a recording run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The source ran dry and the pipeline drained
    EndOfStream,
    /// SIGINT asked the pipeline to stop
    Interrupted,
}

/// Recording pipeline and its configuration state
#[derive(Debug)]
pub struct Recorder {
    pipeline: gst::Pipeline,
    output_path: Option<PathBuf>,
}

impl Recorder {
    /// Build the pipeline described by `config`
    ///
    /// All elements must be created and linked before this returns; any
    /// missing element or refused link is terminal.
    pub fn new(config: &RecorderConfig) -> RecorderResult<Self> {
        info!(
            device = %config.device,
            width = config.width,
            height = config.height,
            format = %config.pixel_format,
            framerate = config.framerate,
            bitrate = config.bitrate_kbps,
            sink = ?config.sink_mode,
            "Creating recorder pipeline"
        );

        let pipeline = gst::Pipeline::with_name(PIPELINE_NAME);

        let source = elements::create_capture_source(&config.device)?;
        let converter = elements::create_converter()?;
        let converter_queue = elements::create_queue("converter_queue")?;
        let selected = encoder::select_h264_encoder(config.bitrate_kbps)?;
        let encoder_queue = elements::create_queue("encoder_queue")?;
        let caps = raw_video_caps(config)?;

        let output_path = match config.sink_mode {
            SinkMode::File => {
                let output_path = config.resolved_output_path();
                if let Some(parent) = output_path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }

                let parser = encoder::create_parser()?;
                let tail = muxer::create_mux_tail(output_path)?;

                pipeline
                    .add_many([
                        &source,
                        &converter,
                        &converter_queue,
                        &selected.encoder,
                        &encoder_queue,
                        &parser,
                        &tail.muxer,
                        &tail.filesink,
                    ])
                    .map_err(|e| {
                        RecorderError::Pipeline(format!("failed to add elements to pipeline: {}", e))
                    })?;

                link_capture(&source, &converter, &caps)?;
                gst::Element::link_many([
                    &converter,
                    &converter_queue,
                    &selected.encoder,
                    &encoder_queue,
                    &parser,
                ])
                .map_err(|_| {
                    RecorderError::Link("failed to link converter chain to parser".to_string())
                })?;
                muxer::link_video_to_muxer(&parser, &tail.muxer)?;
                muxer::link_muxer_to_sink(&tail.muxer, &tail.filesink)?;

                Some(tail.output_path)
            }
            SinkMode::Drain => {
                let appsink = drain::create_drain_sink(drain::log_encoded_buffer)?;

                pipeline
                    .add_many([
                        &source,
                        &converter,
                        &converter_queue,
                        &selected.encoder,
                        &encoder_queue,
                        appsink.upcast_ref::<gst::Element>(),
                    ])
                    .map_err(|e| {
                        RecorderError::Pipeline(format!("failed to add elements to pipeline: {}", e))
                    })?;

                link_capture(&source, &converter, &caps)?;
                gst::Element::link_many([
                    &converter,
                    &converter_queue,
                    &selected.encoder,
                    &encoder_queue,
                    appsink.upcast_ref::<gst::Element>(),
                ])
                .map_err(|_| {
                    RecorderError::Link("failed to link converter chain to appsink".to_string())
                })?;

                None
            }
        };

        info!(
            encoder = %selected.element_name,
            hardware = selected.is_hardware,
            "Recorder pipeline ready"
        );

        Ok(Recorder {
            pipeline,
            output_path,
        })
    }

    /// Output file path, when the pipeline writes one
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Run the pipeline until end-of-stream, error, or interrupt
    ///
    /// Blocks on the bus, handling one message at a time. The pipeline is
    /// torn down before returning regardless of the outcome.
    pub fn run(&self) -> RecorderResult<RunOutcome> {
        info!("Starting recording");
        self.pipeline
            .set_state(gst::State::Playing)
            .map_err(|_| {
                RecorderError::StateChange(
                    "unable to set the pipeline to the Playing state".to_string(),
                )
            })?;

        self.install_interrupt_handler()?;

        let bus = self
            .pipeline
            .bus()
            .ok_or_else(|| RecorderError::Pipeline("pipeline has no message bus".to_string()))?;

        let outcome = self.wait_for_completion(&bus);
        self.shutdown();
        outcome
    }

    /// Install the SIGINT handler
    ///
    /// On interrupt the handler sends EOS downstream so in-flight buffers
    /// drain, and posts the application interrupt message on the bus.
    fn install_interrupt_handler(&self) -> RecorderResult<()> {
        let pipeline = self.pipeline.downgrade();
        ctrlc::set_handler(move || {
            let Some(pipeline) = pipeline.upgrade() else {
                return;
            };
            info!("Handling interrupt, requesting end of stream");
            pipeline.send_event(gst::event::Eos::new());

            let structure = gst::Structure::builder(INTERRUPT_MESSAGE_NAME)
                .field("message", "Pipeline interrupted")
                .build();
            let _ = pipeline.post_message(gst::message::Application::new(structure));
        })?;
        Ok(())
    }

    /// Poll the bus until a terminal message arrives
    fn wait_for_completion(&self, bus: &gst::Bus) -> RecorderResult<RunOutcome> {
        for msg in bus.iter_timed(gst::ClockTime::NONE) {
            match msg.view() {
                gst::MessageView::Eos(..) => {
                    info!("End of stream reached");
                    return Ok(RunOutcome::EndOfStream);
                }
                gst::MessageView::Error(err) => {
                    error!(
                        source = ?err.src().map(|s| s.name()),
                        error = %err.error(),
                        debug = ?err.debug(),
                        "Error received on the pipeline bus"
                    );
                    let source = err
                        .src()
                        .map(|s| s.name().to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    return Err(RecorderError::Pipeline(format!(
                        "{} (from {})",
                        err.error(),
                        source
                    )));
                }
                gst::MessageView::NewClock(..) => {
                    info!("Pipeline selected a new clock");
                }
                gst::MessageView::Application(app) => {
                    if app.structure().is_some_and(|s| is_interrupt_message(s.name())) {
                        info!("Interrupt, stopping pipeline");
                        return Ok(RunOutcome::Interrupted);
                    }
                }
                _ => {}
            }
        }

        Err(RecorderError::Pipeline(
            "message bus closed unexpectedly".to_string(),
        ))
    }

    /// Step the pipeline down through the intermediate states
    fn shutdown(&self) {
        for state in [gst::State::Paused, gst::State::Ready, gst::State::Null] {
            if self.pipeline.set_state(state).is_err() {
                warn!(state = ?state, "Failed to step pipeline down");
            }
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        // Idempotent when run() already tore the pipeline down
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

/// Link the capture source to the converter through the negotiated raw caps
fn link_capture(
    source: &gst::Element,
    converter: &gst::Element,
    caps: &gst::Caps,
) -> RecorderResult<()> {
    source.link_filtered(converter, caps).map_err(|_| {
        RecorderError::Link("failed to link capture source to converter".to_string())
    })
}

/// Build the raw video caps between capture and conversion
fn raw_video_caps(config: &RecorderConfig) -> RecorderResult<gst::Caps> {
    let format = config
        .pixel_format
        .parse::<gstreamer_video::VideoFormat>()
        .map_err(|_| {
            RecorderError::Config(format!(
                "unsupported pixel format fourcc: {}",
                config.pixel_format
            ))
        })?;

    Ok(gst::Caps::builder("video/x-raw")
        .field("format", format.to_str())
        .field("width", config.width as i32)
        .field("height", config.height as i32)
        .field("framerate", gst::Fraction::new(config.framerate as i32, 1))
        .build())
}

/// Check an application bus message structure name against the interrupt
fn is_interrupt_message(name: &str) -> bool {
    name == INTERRUPT_MESSAGE_NAME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_structure_recognized() {
        assert!(is_interrupt_message(INTERRUPT_MESSAGE_NAME));
    }

    #[test]
    fn test_unrelated_application_structures_ignored() {
        assert!(!is_interrupt_message("GstBinForwarded"));
        assert!(!is_interrupt_message(""));
    }
}
