//! ffmpeg CLI command builder and runner
//!
//! A thin, testable wrapper: the builder accumulates arguments so unit
//! tests can assert the exact invocation without spawning a process.

use crate::processing::{ProcessingError, ProcessingResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Builder for one ffmpeg invocation.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    input: PathBuf,
    output: PathBuf,
    /// Arguments placed before `-i` (seek, duration)
    input_args: Vec<String>,
    /// Video filters, joined into a single `-vf` chain
    filters: Vec<String>,
}

impl FfmpegCommand {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Seek position before the input (`-ss`).
    pub fn seek(mut self, seconds: f64) -> Self {
        self.input_args.push("-ss".to_string());
        self.input_args.push(format!("{:.3}", seconds));
        self
    }

    /// Output duration (`-t`).
    pub fn duration(mut self, seconds: f64) -> Self {
        self.input_args.push("-t".to_string());
        self.input_args.push(format!("{:.3}", seconds));
        self
    }

    /// Append a video filter to the `-vf` chain.
    pub fn video_filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Full argument list as passed to the ffmpeg binary.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(),
        ];
        args.extend(self.input_args.iter().cloned());
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());
        if !self.filters.is_empty() {
            args.push("-vf".to_string());
            args.push(self.filters.join(","));
        }
        args.push(self.output.to_string_lossy().to_string());
        args
    }

    /// Run ffmpeg to completion.
    pub async fn run(&self) -> ProcessingResult<()> {
        let args = self.build_args();
        tracing::debug!("running ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ProcessingError::FfmpegUnavailable(e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Keep only the tail; ffmpeg errors end with the useful part
            let tail: String = stderr
                .lines()
                .rev()
                .take(5)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect::<Vec<_>>()
                .join("\n");
            Err(ProcessingError::FfmpegFailed(tail))
        }
    }
}
