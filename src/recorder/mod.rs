//! Recording pipeline: clock, encoding sink contract, session facade

pub mod clock;
pub mod session;
pub mod sink;

pub use clock::FrameClock;
pub use session::{default_output_name, save_video, RecordingSession, SessionConfig, SessionState};
pub use sink::{negotiate_format, ContainerFormat, EncodingSink, RecordingError, RecordingResult};
