//! Capture collaborators: source enumeration, live frames, input events

pub mod events;
pub mod source;

pub use events::{EventQueue, InputEvent};
pub use source::{CaptureSource, FrameStatus, SourceInfo, SourceKind, SourceProvider};
