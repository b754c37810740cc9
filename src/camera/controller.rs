//! Virtual camera controller
//!
//! Converts sparse pointer/click/key activity into smooth, bounded camera
//! motion over the source frame. The controller is the only stateful
//! decision-maker in the composition pipeline: it owns the current and
//! target camera state, advances a small mode state machine, and computes
//! one clamped, time-smoothed transform per tick.
//!
//! All methods take explicit `now_ms` timestamps so behavior is fully
//! deterministic under test; no hidden clocks.

use crate::camera::config::CameraConfig;
use crate::camera::tracker::{ActivityTracker, Classification};
use crate::compose::frame::Resolution;
use serde::{Deserialize, Serialize};

/// Camera position (source-frame pixels, viewport center) and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Behavioral mode of the virtual camera. Exactly one is active per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// No recent activity; camera rests zoomed out at the frame center
    Idle,
    /// Tracking pointer movement at the active zoom level
    Following,
    /// Pinned to the most recent click location at the click zoom level
    ClickLocked,
}

pub struct CameraController {
    config: CameraConfig,
    frame: Resolution,
    /// Logical screen size; pointer coordinates arrive in this space and are
    /// rescaled into frame-pixel space.
    screen: Resolution,
    tracker: ActivityTracker,
    mode: Mode,
    current: CameraState,
    target: CameraState,
    /// Accepted pointer position at the moment click-lock was entered
    click_anchor: Option<(f64, f64)>,
}

impl CameraController {
    pub fn new(config: CameraConfig, frame: Resolution, screen: Resolution) -> Self {
        let center = CameraState {
            x: f64::from(frame.width) / 2.0,
            y: f64::from(frame.height) / 2.0,
            zoom: config.zoom_idle_level,
        };
        let tracker = ActivityTracker::new(config.activity_deadzone_px);
        Self {
            config,
            frame,
            screen,
            tracker,
            mode: Mode::Idle,
            current: center,
            target: center,
            click_anchor: None,
        }
    }

    /// Return to centered idle state, as at session start.
    pub fn reset(&mut self) {
        let center = CameraState {
            x: f64::from(self.frame.width) / 2.0,
            y: f64::from(self.frame.height) / 2.0,
            zoom: self.config.zoom_idle_level,
        };
        self.current = center;
        self.target = center;
        self.mode = Mode::Idle;
        self.click_anchor = None;
        self.tracker.reset();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current(&self) -> CameraState {
        self.current
    }

    pub fn target(&self) -> CameraState {
        self.target
    }

    /// Handle a pointer sample in logical screen coordinates.
    ///
    /// The first sample after a reset only seeds the tracker. Later samples
    /// must clear the activity deadzone to register; a registered sample can
    /// break click-lock and retarget the camera.
    pub fn on_pointer_move(&mut self, raw_x: f64, raw_y: f64, now_ms: f64) {
        let scale_x = f64::from(self.frame.width) / f64::from(self.screen.width.max(1));
        let scale_y = f64::from(self.frame.height) / f64::from(self.screen.height.max(1));
        let x = raw_x * scale_x;
        let y = raw_y * scale_y;

        let sample = match self.tracker.classify(x, y, now_ms) {
            Classification::Significant(sample) => sample,
            Classification::Seed | Classification::Noise => return,
        };

        if self.mode == Mode::ClickLocked {
            if let Some((anchor_x, anchor_y)) = self.click_anchor {
                let dx = (sample.x - anchor_x).abs();
                let dy = (sample.y - anchor_y).abs();
                // Strictly greater: moving exactly the breakout distance
                // keeps the lock.
                if dx.max(dy) > self.config.click_breakout_px {
                    self.mode = Mode::Following;
                    self.click_anchor = None;
                }
            }
        }

        if self.mode != Mode::ClickLocked {
            let dist_x = sample.x - self.target.x;
            let dist_y = sample.y - self.target.y;
            let dist = (dist_x * dist_x + dist_y * dist_y).sqrt();
            if dist > self.config.move_deadzone_px {
                // No snapping; the new position is simply the next lerp
                // target and the tick smoothing handles the transition.
                self.mode = Mode::Following;
                self.target.x = sample.x;
                self.target.y = sample.y;
            }
        }
    }

    /// A click anywhere on the monitored desktop pins the camera to the
    /// last accepted pointer position at the click zoom level.
    pub fn on_pointer_down(&mut self, now_ms: f64) {
        self.tracker.touch(now_ms);
        let (x, y) = self.tracker.last_accepted().unwrap_or((
            f64::from(self.frame.width) / 2.0,
            f64::from(self.frame.height) / 2.0,
        ));
        self.mode = Mode::ClickLocked;
        self.click_anchor = Some((x, y));
        self.target = CameraState {
            x,
            y,
            zoom: self.config.click_zoom_level,
        };
    }

    /// Keystrokes refresh the activity timer so the camera does not pull
    /// back mid-typing, but they never move the camera.
    pub fn on_key_activity(&mut self, now_ms: f64) {
        self.tracker.touch(now_ms);
    }

    /// Advance the camera by one tick and return the transform to render.
    pub fn tick(&mut self, now_ms: f64) -> CameraState {
        // A tick may cross the idle timeout even with no new input.
        if self
            .tracker
            .is_idle(now_ms, self.config.idle_timeout_ms)
        {
            self.mode = Mode::Idle;
            self.click_anchor = None;
            self.target = CameraState {
                x: f64::from(self.frame.width) / 2.0,
                y: f64::from(self.frame.height) / 2.0,
                zoom: self.config.zoom_idle_level,
            };
        } else {
            self.target.zoom = match self.mode {
                Mode::Idle => self.config.zoom_idle_level,
                Mode::Following => self.config.zoom_active_level,
                Mode::ClickLocked => self.config.click_zoom_level,
            };
        }

        // Fast pan while zooming in ("lock-on"), languid pan while pulling
        // back so position and zoom arrive together.
        let pan_factor = if self.target.zoom > self.current.zoom {
            self.config.pan_smooth_fast
        } else {
            self.config.pan_smooth_slow
        };

        self.current.zoom += (self.target.zoom - self.current.zoom) * self.config.zoom_smooth;

        let frame_w = f64::from(self.frame.width);
        let frame_h = f64::from(self.frame.height);
        let viewport_w = frame_w / self.current.zoom;
        let viewport_h = frame_h / self.current.zoom;

        // Clamp the target before lerping so the camera approaches an edge
        // smoothly and stops instead of overshooting into black bars.
        let clamped_target_x = clamp_center(self.target.x, frame_w, viewport_w);
        let clamped_target_y = clamp_center(self.target.y, frame_h, viewport_h);

        self.current.x += (clamped_target_x - self.current.x) * pan_factor;
        self.current.y += (clamped_target_y - self.current.y) * pan_factor;

        // Hard clamp after the lerp: the fast-pan/slow-zoom combination can
        // briefly leave the camera outside bounds for the new zoom level.
        self.current.x = clamp_center(self.current.x, frame_w, viewport_w);
        self.current.y = clamp_center(self.current.y, frame_h, viewport_h);

        self.current
    }
}

/// Clamp a viewport center so the viewport stays inside `[0, frame_dim]`.
///
/// When the viewport is at least as large as the frame the valid range
/// collapses to a single point at the frame center.
fn clamp_center(value: f64, frame_dim: f64, viewport_dim: f64) -> f64 {
    if viewport_dim >= frame_dim {
        frame_dim / 2.0
    } else {
        value.clamp(viewport_dim / 2.0, frame_dim - viewport_dim / 2.0)
    }
}
