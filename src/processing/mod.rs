//! Post-recording processing: ffmpeg wrapper and transcoding

pub mod ffmpeg;
pub mod transcode;

use thiserror::Error;

/// Errors from post-processing
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("ffmpeg could not be started: {0}")]
    FfmpegUnavailable(String),

    #[error("ffmpeg failed: {0}")]
    FfmpegFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for processing operations
pub type ProcessingResult<T> = Result<T, ProcessingError>;

pub use ffmpeg::FfmpegCommand;
pub use transcode::{build_command, transcode, Crop, TranscodeOptions, Trim};
