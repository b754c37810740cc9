//! Post-recording transcoding (trim, crop, blur)
//!
//! Runs out-of-process over temporary storage. Scratch files live in a
//! `TempDir`, so they are removed on the success and failure paths alike;
//! cleanup errors are swallowed by the `TempDir` drop, never escalated.

use crate::processing::ffmpeg::FfmpegCommand;
use crate::processing::{ProcessingError, ProcessingResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trim range in seconds from the start of the recording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trim {
    pub start: f64,
    pub end: f64,
}

/// Fixed crop region in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub w: u32,
    pub h: u32,
    pub x: u32,
    pub y: u32,
}

/// Requested post-processing steps.
///
/// `blur` is a uniform full-frame blur. It is offered alongside `crop` in
/// the same request but does not take a region in this version; regional
/// blur would need a filter graph this transcoder does not build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscodeOptions {
    pub trim: Option<Trim>,
    pub crop: Option<Crop>,
    pub blur: bool,
}

impl TranscodeOptions {
    pub fn is_noop(&self) -> bool {
        self.trim.is_none() && self.crop.is_none() && !self.blur
    }
}

/// Build the ffmpeg invocation for the requested options.
///
/// Trim boundaries are clamped defensively: a negative start becomes 0 and
/// an inverted range collapses to a zero-duration output rather than
/// producing a negative `-t`.
pub fn build_command(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &TranscodeOptions,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(input, output);

    if let Some(trim) = options.trim {
        let start = trim.start.max(0.0);
        let duration = (trim.end - start).max(0.0);
        cmd = cmd.seek(start).duration(duration);
    }

    if let Some(crop) = options.crop {
        cmd = cmd.video_filter(format!("crop={}:{}:{}:{}", crop.w, crop.h, crop.x, crop.y));
    }

    if options.blur {
        cmd = cmd.video_filter("boxblur=10:1");
    }

    cmd
}

/// Transcode encoded recording bytes, returning the processed bytes.
pub async fn transcode(bytes: &[u8], options: &TranscodeOptions) -> ProcessingResult<Vec<u8>> {
    if bytes.is_empty() {
        return Err(ProcessingError::InvalidInput("empty input".to_string()));
    }

    let scratch = tempfile::TempDir::new()?;
    let input = scratch.path().join("input.webm");
    let output = scratch.path().join("output.mp4");

    tokio::fs::write(&input, bytes).await?;

    tracing::info!(
        "transcoding {} bytes (trim={:?}, crop={:?}, blur={})",
        bytes.len(),
        options.trim,
        options.crop,
        options.blur
    );

    build_command(&input, &output, options).run().await?;

    let processed = tokio::fs::read(&output).await?;
    tracing::info!("transcode produced {} bytes", processed.len());

    // `scratch` drops here, removing input and output best-effort
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(options: &TranscodeOptions) -> Vec<String> {
        build_command("in.webm", "out.mp4", options).build_args()
    }

    #[test]
    fn test_noop_options_produce_plain_remux() {
        let args = args_for(&TranscodeOptions::default());
        assert!(!args.contains(&"-vf".to_string()));
        assert!(!args.contains(&"-ss".to_string()));
    }

    #[test]
    fn test_trim_maps_to_seek_and_duration() {
        let options = TranscodeOptions {
            trim: Some(Trim { start: 2.0, end: 5.5 }),
            ..TranscodeOptions::default()
        };
        let args = args_for(&options);
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "2.000");
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "3.500");
    }

    #[test]
    fn test_inverted_trim_clamps_to_zero_duration() {
        let options = TranscodeOptions {
            trim: Some(Trim { start: 5.0, end: 2.0 }),
            ..TranscodeOptions::default()
        };
        let args = args_for(&options);
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "0.000");
    }

    #[test]
    fn test_negative_start_clamps_to_zero() {
        let options = TranscodeOptions {
            trim: Some(Trim { start: -1.0, end: 2.0 }),
            ..TranscodeOptions::default()
        };
        let args = args_for(&options);
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "0.000");
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "2.000");
    }

    #[test]
    fn test_crop_and_blur_filters() {
        let options = TranscodeOptions {
            crop: Some(Crop { w: 1280, h: 720, x: 320, y: 180 }),
            blur: true,
            ..TranscodeOptions::default()
        };
        let args = args_for(&options);
        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[vf + 1], "crop=1280:720:320:180,boxblur=10:1");
    }

    #[test]
    fn test_options_json_shape() {
        let options: TranscodeOptions = serde_json::from_str(
            r#"{"trim":{"start":0.0,"end":3.0},"blur":true}"#,
        )
        .unwrap();
        assert!(options.trim.is_some());
        assert!(options.crop.is_none());
        assert!(options.blur);
        assert!(!options.is_noop());
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let result = transcode(&[], &TranscodeOptions::default()).await;
        assert!(matches!(result, Err(ProcessingError::InvalidInput(_))));
    }
}
