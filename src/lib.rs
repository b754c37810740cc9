//! followcam - Presenter-following screen recordings.
//!
//! A virtual camera pans and zooms toward pointer, click and keyboard
//! activity while the screen is recorded, producing a composed feed that
//! follows the presenter in real time. The host application supplies the
//! capture source, the global input observer and the encoding sink; this
//! crate owns the camera controller, the compositing loop, the session
//! lifecycle and the post-recording transcoder.

pub mod camera;
pub mod capture;
pub mod compose;
pub mod processing;
pub mod recorder;

pub use camera::{CameraConfig, CameraController, CameraState, Mode};
pub use capture::{
    CaptureSource, EventQueue, FrameStatus, InputEvent, SourceInfo, SourceKind, SourceProvider,
};
pub use compose::{CapturedFrame, ComposedFrame, Resolution};
pub use processing::{transcode, ProcessingError, TranscodeOptions};
pub use recorder::{
    save_video, ContainerFormat, EncodingSink, RecordingError, RecordingResult, RecordingSession,
    SessionConfig, SessionState,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for hosts that do not bring their own
/// subscriber. Respects `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "followcam=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("followcam v{}", env!("CARGO_PKG_VERSION"));
}
