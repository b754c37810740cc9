//! Virtual camera: activity tracking, mode state machine, smoothed transform

pub mod config;
pub mod controller;
pub mod tracker;

pub use config::CameraConfig;
pub use controller::{CameraController, CameraState, Mode};
pub use tracker::{ActivityTracker, Classification};
