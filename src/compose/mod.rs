//! Frame types and the pure compositor

pub mod compositor;
pub mod frame;

pub use compositor::render;
pub use frame::{CapturedFrame, ComposedFrame, Resolution};
