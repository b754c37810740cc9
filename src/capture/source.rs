//! Capture source contracts
//!
//! Screen/window enumeration and raw frame acquisition are platform
//! collaborators; the session consumes them through these traits so the
//! core never touches platform capture APIs directly.

use crate::compose::frame::{CapturedFrame, Resolution};
use crate::recorder::sink::RecordingResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of capture source, derived from the id prefix convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Screen,
    Window,
}

/// One enumerable capture source (a display or an application window).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Opaque id; `"screen:"`-prefixed ids are full displays
    pub id: String,
    pub name: String,
    /// Encoded preview image, if the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Vec<u8>>,
    /// Owning application icon, only meaningful for windows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_icon: Option<Vec<u8>>,
}

impl SourceInfo {
    pub fn kind(&self) -> SourceKind {
        if self.id.starts_with("screen:") {
            SourceKind::Screen
        } else {
            SourceKind::Window
        }
    }
}

/// State of the capture stream at one tick.
#[derive(Debug, Clone)]
pub enum FrameStatus {
    /// A frame is available; the reference is valid for this tick only
    Ready(Arc<CapturedFrame>),
    /// The stream is live but has not produced a frame yet
    Pending,
    /// The source disappeared; treat as an implicit stop request
    Ended,
}

/// A live capture stream at the source's native resolution.
///
/// `latest_frame` must never block: it returns whatever frame is currently
/// available so the tick loop keeps its cadence.
pub trait CaptureSource: Send + Sync {
    fn resolution(&self) -> Resolution;
    fn latest_frame(&self) -> FrameStatus;
}

/// Enumerates capture sources and opens live streams.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn enumerate(&self) -> RecordingResult<Vec<SourceInfo>>;

    /// Open a live stream for the given source id.
    ///
    /// Permission denial or a disconnected source fails here, before any
    /// session state has been touched.
    async fn open(&self, id: &str) -> RecordingResult<Box<dyn CaptureSource>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> SourceInfo {
        SourceInfo {
            id: id.to_string(),
            name: "test".to_string(),
            thumbnail: None,
            app_icon: None,
        }
    }

    #[test]
    fn test_kind_partition_by_id_prefix() {
        assert_eq!(info("screen:0:0").kind(), SourceKind::Screen);
        assert_eq!(info("window:1234").kind(), SourceKind::Window);
        // Anything without the screen prefix is treated as a window
        assert_eq!(info("1234").kind(), SourceKind::Window);
    }

    #[test]
    fn test_source_info_serializes_camel_case() {
        let mut source = info("screen:0:0");
        source.app_icon = Some(vec![1, 2, 3]);
        let json = serde_json::to_value(&source).unwrap();
        assert!(json.get("appIcon").is_some());
        assert!(json.get("thumbnail").is_none());
    }
}
