//! Recording session facade
//!
//! Wires the capture source, virtual camera, compositor, frame clock and
//! encoding sink into one session. All shared mutable camera state is owned
//! by the tick loop; the async facade only queues events and drives the
//! sink lifecycle.

use crate::camera::{CameraConfig, CameraController, CameraState, Mode};
use crate::capture::{CaptureSource, EventQueue, FrameStatus, InputEvent, SourceInfo, SourceProvider};
use crate::compose::{self, Resolution};
use crate::recorder::clock::FrameClock;
use crate::recorder::sink::{negotiate_format, EncodingSink, RecordingError, RecordingResult};
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex as TokioMutex;
use uuid::Uuid;

/// Session-wide configuration, immutable once recording starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Output frame rate
    pub fps: u32,
    pub camera: CameraConfig,
    /// Logical screen size pointer coordinates are reported in
    pub screen: Resolution,
}

impl SessionConfig {
    pub fn new(screen: Resolution) -> Self {
        Self {
            fps: 60,
            camera: CameraConfig::default(),
            screen,
        }
    }
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Idle,
    Recording,
    Paused,
    /// The capture source disappeared mid-recording; awaiting `stop()`
    Ended,
}

/// Everything the clock thread touches each tick.
struct TickShared {
    controller: ParkingMutex<CameraController>,
    source: Box<dyn CaptureSource>,
    events: EventQueue,
    sink: Arc<TokioMutex<Box<dyn EncodingSink>>>,
    paused: AtomicBool,
    state: Arc<ParkingMutex<SessionState>>,
    started_at: Instant,
    output: Resolution,
    /// Set once the clock exists so a tick can halt it on source loss
    clock_flag: ParkingMutex<Option<Arc<AtomicBool>>>,
}

impl TickShared {
    fn tick(&self) {
        let now_ms = self.started_at.elapsed().as_secs_f64() * 1000.0;

        // Apply queued input atomically at the tick boundary so events from
        // the out-of-process observer never interleave mid-tick.
        {
            let mut controller = self.controller.lock();
            for event in self.events.drain() {
                match event {
                    InputEvent::PointerMove { x, y } => controller.on_pointer_move(x, y, now_ms),
                    InputEvent::PointerDown => controller.on_pointer_down(now_ms),
                    InputEvent::KeyActivity => controller.on_key_activity(now_ms),
                }
            }
        }

        let transform: CameraState = self.controller.lock().tick(now_ms);

        let frame = match self.source.latest_frame() {
            FrameStatus::Ready(frame) => Some(frame),
            FrameStatus::Pending => None,
            FrameStatus::Ended => {
                tracing::warn!("capture source ended; halting tick loop");
                *self.state.lock() = SessionState::Ended;
                if let Some(flag) = self.clock_flag.lock().as_ref() {
                    flag.store(false, Ordering::SeqCst);
                }
                return;
            }
        };

        let composed = compose::render(transform, frame.as_deref(), self.output, now_ms);

        // Pausing gates only sink consumption; the camera keeps evolving so
        // resume never re-applies a stale transform.
        if !self.paused.load(Ordering::SeqCst) {
            // Plain OS thread, never inside the async runtime
            if let Err(e) = self.sink.blocking_lock().push_frame(&composed) {
                tracing::warn!("sink rejected frame: {}", e);
            }
        }
    }
}

pub struct RecordingSession {
    provider: Box<dyn SourceProvider>,
    sink: Arc<TokioMutex<Box<dyn EncodingSink>>>,
    config: SessionConfig,
    events: EventQueue,
    state: Arc<ParkingMutex<SessionState>>,
    clock: Option<FrameClock>,
    shared: Option<Arc<TickShared>>,
    session_id: Option<Uuid>,
    started_at: Option<Instant>,
}

impl RecordingSession {
    pub fn new(
        provider: Box<dyn SourceProvider>,
        sink: Box<dyn EncodingSink>,
        config: SessionConfig,
    ) -> Self {
        Self {
            provider,
            sink: Arc::new(TokioMutex::new(sink)),
            config,
            events: EventQueue::new(),
            state: Arc::new(ParkingMutex::new(SessionState::Idle)),
            clock: None,
            shared: None,
            session_id: None,
            started_at: None,
        }
    }

    /// List capture sources the provider can open.
    pub async fn enumerate_sources(&self) -> RecordingResult<Vec<SourceInfo>> {
        self.provider.enumerate().await
    }

    /// Start recording the given source.
    ///
    /// Any failure here (permission denied, missing source, sink refusing to
    /// start) leaves the session fully idle; nothing keeps running.
    pub async fn start(&mut self, source_id: &str) -> RecordingResult<()> {
        if *self.state.lock() != SessionState::Idle {
            return Err(RecordingError::AlreadyRecording);
        }

        self.config
            .camera
            .validate()
            .map_err(RecordingError::ConfigurationError)?;

        let source = self.provider.open(source_id).await?;
        let resolution = source.resolution();

        let format = negotiate_format(&**self.sink.lock().await);
        match format {
            Some(format) => tracing::info!("encoding sink format: {:?}", format),
            None => tracing::warn!("no preferred format supported, using sink default"),
        }
        self.sink
            .lock()
            .await
            .start(format, resolution, self.config.fps)
            .await?;

        let started_at = Instant::now();
        let controller =
            CameraController::new(self.config.camera.clone(), resolution, self.config.screen);
        self.events.clear();

        let shared = Arc::new(TickShared {
            controller: ParkingMutex::new(controller),
            source,
            events: self.events.clone(),
            sink: self.sink.clone(),
            paused: AtomicBool::new(false),
            state: self.state.clone(),
            started_at,
            output: resolution,
            clock_flag: ParkingMutex::new(None),
        });

        let period = Duration::from_secs_f64(1.0 / f64::from(self.config.fps.max(1)));
        let tick_shared = shared.clone();
        let clock = FrameClock::start(period, move || tick_shared.tick())?;
        *shared.clock_flag.lock() = Some(clock.running_flag());

        let session_id = Uuid::new_v4();
        self.shared = Some(shared);
        self.clock = Some(clock);
        self.session_id = Some(session_id);
        self.started_at = Some(started_at);
        *self.state.lock() = SessionState::Recording;

        tracing::info!(
            "recording session {} started (source={}, {}x{} @ {}fps)",
            session_id,
            source_id,
            resolution.width,
            resolution.height,
            self.config.fps
        );
        Ok(())
    }

    /// Queue a pointer position sample (logical screen coordinates).
    pub fn push_pointer_move(&self, x: f64, y: f64) {
        self.events.push(InputEvent::PointerMove { x, y });
    }

    /// Queue a pointer click.
    pub fn push_pointer_down(&self) {
        self.events.push(InputEvent::PointerDown);
    }

    /// Queue key activity.
    pub fn push_key_activity(&self) {
        self.events.push(InputEvent::KeyActivity);
    }

    /// Pause sink consumption. The camera keeps panning and zooming.
    pub async fn pause(&mut self) -> RecordingResult<()> {
        if *self.state.lock() != SessionState::Recording {
            return Err(RecordingError::NotRecording);
        }
        if let Some(shared) = &self.shared {
            shared.paused.store(true, Ordering::SeqCst);
        }
        self.sink.lock().await.pause().await?;
        *self.state.lock() = SessionState::Paused;
        tracing::info!("recording paused");
        Ok(())
    }

    /// Resume sink consumption.
    pub async fn resume(&mut self) -> RecordingResult<()> {
        if *self.state.lock() != SessionState::Paused {
            return Err(RecordingError::NotRecording);
        }
        self.sink.lock().await.resume().await?;
        if let Some(shared) = &self.shared {
            shared.paused.store(false, Ordering::SeqCst);
        }
        *self.state.lock() = SessionState::Recording;
        tracing::info!("recording resumed");
        Ok(())
    }

    /// Stop recording and return the encoded bytes.
    ///
    /// The clock is stopped before the sink is finalized, so no tick fires
    /// after this returns and the capture source reference is released.
    pub async fn stop(&mut self) -> RecordingResult<Vec<u8>> {
        if *self.state.lock() == SessionState::Idle {
            return Err(RecordingError::NotRecording);
        }

        if let Some(clock) = self.clock.take() {
            clock.stop();
        }
        // Dropping the tick state releases the capture source
        self.shared = None;

        let bytes = self.sink.lock().await.stop().await?;

        let session_id = self.session_id.take();
        self.started_at = None;
        *self.state.lock() = SessionState::Idle;

        tracing::info!(
            "recording session {} stopped ({} bytes)",
            session_id.map(|id| id.to_string()).unwrap_or_default(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Milliseconds since the session started, 0 while idle.
    pub fn duration_ms(&self) -> f64 {
        self.started_at
            .map(|t| t.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    /// Camera mode right now, for UI indicators. `None` while idle.
    pub fn camera_mode(&self) -> Option<Mode> {
        self.shared.as_ref().map(|s| s.controller.lock().mode())
    }
}

/// Write encoded video bytes to the path the user chose at save time.
pub async fn save_video(bytes: &[u8], path: &Path) -> RecordingResult<()> {
    tokio::fs::write(path, bytes).await?;
    tracing::info!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Default output file name, e.g. `recording-20260829-143015.mp4`.
pub fn default_output_name() -> String {
    format!(
        "recording-{}.mp4",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    )
}
