//! Headless demo: records a synthetic source for a few seconds while a
//! scripted pointer wanders, clicks and idles, then prints what the sink
//! received. Useful for eyeballing the camera behavior without a real
//! capture stack.

use anyhow::Result;
use async_trait::async_trait;
use followcam::{
    CaptureSource, CapturedFrame, ComposedFrame, ContainerFormat, EncodingSink, FrameStatus,
    RecordingResult, RecordingSession, Resolution, SessionConfig, SourceInfo, SourceProvider,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const RES: Resolution = Resolution {
    width: 640,
    height: 360,
};

struct GradientSource;

impl CaptureSource for GradientSource {
    fn resolution(&self) -> Resolution {
        RES
    }

    fn latest_frame(&self) -> FrameStatus {
        let mut data = vec![0u8; RES.width as usize * RES.height as usize * 4];
        for y in 0..RES.height as usize {
            for x in 0..RES.width as usize {
                let i = (y * RES.width as usize + x) * 4;
                data[i] = (x * 255 / RES.width as usize) as u8;
                data[i + 1] = (y * 255 / RES.height as usize) as u8;
                data[i + 3] = 0xff;
            }
        }
        FrameStatus::Ready(Arc::new(CapturedFrame {
            data,
            width: RES.width,
            height: RES.height,
            timestamp_ms: 0.0,
            bytes_per_row: RES.width * 4,
        }))
    }
}

struct DemoProvider;

#[async_trait]
impl SourceProvider for DemoProvider {
    async fn enumerate(&self) -> RecordingResult<Vec<SourceInfo>> {
        Ok(vec![SourceInfo {
            id: "screen:demo".to_string(),
            name: "Synthetic gradient".to_string(),
            thumbnail: None,
            app_icon: None,
        }])
    }

    async fn open(&self, _id: &str) -> RecordingResult<Box<dyn CaptureSource>> {
        Ok(Box::new(GradientSource))
    }
}

#[derive(Default)]
struct CountingSink {
    frames: Arc<Mutex<usize>>,
}

#[async_trait]
impl EncodingSink for CountingSink {
    fn supports(&self, format: ContainerFormat) -> bool {
        format == ContainerFormat::Webm
    }

    async fn start(
        &mut self,
        format: Option<ContainerFormat>,
        resolution: Resolution,
        fps: u32,
    ) -> RecordingResult<()> {
        tracing::info!(
            "sink started: {:?} {}x{} @ {}fps",
            format,
            resolution.width,
            resolution.height,
            fps
        );
        Ok(())
    }

    fn push_frame(&mut self, _frame: &ComposedFrame) -> RecordingResult<()> {
        *self.frames.lock() += 1;
        Ok(())
    }

    async fn pause(&mut self) -> RecordingResult<()> {
        Ok(())
    }

    async fn resume(&mut self) -> RecordingResult<()> {
        Ok(())
    }

    async fn stop(&mut self) -> RecordingResult<Vec<u8>> {
        Ok(format!("{} frames", self.frames.lock()).into_bytes())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    followcam::init_tracing();

    let sink = CountingSink::default();
    let frames = sink.frames.clone();
    let mut session = RecordingSession::new(
        Box::new(DemoProvider),
        Box::new(sink),
        SessionConfig::new(RES),
    );

    let sources = session.enumerate_sources().await?;
    session.start(&sources[0].id).await?;

    // Wander right, click, break out, then idle back to center
    for i in 0..30 {
        session.push_pointer_move(100.0 + f64::from(i) * 15.0, 180.0);
        tokio::time::sleep(Duration::from_millis(33)).await;
        if let Some(mode) = session.camera_mode() {
            tracing::debug!("t={:.0}ms mode={:?}", session.duration_ms(), mode);
        }
    }
    session.push_pointer_down();
    tokio::time::sleep(Duration::from_millis(500)).await;
    tracing::info!("after click: mode={:?}", session.camera_mode());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    tracing::info!("after idle: mode={:?}", session.camera_mode());

    let bytes = session.stop().await?;
    tracing::info!(
        "sink summary: {} ({} ticks pushed)",
        String::from_utf8_lossy(&bytes),
        frames.lock()
    );
    Ok(())
}
