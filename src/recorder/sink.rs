//! Encoding sink contract
//!
//! The sink turns the composed frame stream into a container file. Codec
//! negotiation internals are the sink's business; the session only walks a
//! preference list of container formats and falls back to the sink's
//! default if none is supported.

use crate::compose::frame::{ComposedFrame, Resolution};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during recording
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Already recording")]
    AlreadyRecording,

    #[error("Not recording")]
    NotRecording,

    #[error("Capture error: {0}")]
    CaptureError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for recording operations
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Container/codec combinations, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// MP4 with H.264, best playback compatibility
    Mp4H264,
    WebmH264,
    WebmVp9,
    WebmVp8,
    /// Plain WebM with whatever codec the sink picks
    Webm,
}

impl ContainerFormat {
    /// Descending preference order used at sink start.
    pub const PREFERENCE: [ContainerFormat; 5] = [
        ContainerFormat::Mp4H264,
        ContainerFormat::WebmH264,
        ContainerFormat::WebmVp9,
        ContainerFormat::WebmVp8,
        ContainerFormat::Webm,
    ];
}

/// Pick the first supported format from the preference list.
///
/// If the sink supports none of them, returns `None` and the caller starts
/// the sink with its default configuration instead of failing outright.
pub fn negotiate_format(sink: &dyn EncodingSink) -> Option<ContainerFormat> {
    ContainerFormat::PREFERENCE
        .into_iter()
        .find(|format| sink.supports(*format))
}

/// Consumer of the composed frame stream.
///
/// `push_frame` is called from the clock thread and must not block; the
/// async lifecycle methods are called from the session facade.
#[async_trait]
pub trait EncodingSink: Send + Sync {
    fn supports(&self, format: ContainerFormat) -> bool;

    /// Begin encoding. `format` is `None` when negotiation found no
    /// supported entry and the sink should use its default.
    async fn start(
        &mut self,
        format: Option<ContainerFormat>,
        resolution: Resolution,
        fps: u32,
    ) -> RecordingResult<()>;

    fn push_frame(&mut self, frame: &ComposedFrame) -> RecordingResult<()>;

    async fn pause(&mut self) -> RecordingResult<()>;

    async fn resume(&mut self) -> RecordingResult<()>;

    /// Finalize and return the encoded container bytes.
    async fn stop(&mut self) -> RecordingResult<Vec<u8>>;
}
