//! Virtual camera tuning parameters

use serde::{Deserialize, Serialize};

/// Tuning parameters for the virtual camera.
///
/// Immutable for the lifetime of a recording session. Zoom levels must
/// satisfy `zoom_idle_level <= zoom_active_level <= click_zoom_level`;
/// [`CameraConfig::validate`] enforces this at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    /// Zoom level when no activity has happened for a while
    pub zoom_idle_level: f64,
    /// Zoom level while following pointer movement
    pub zoom_active_level: f64,
    /// Zoom level while locked onto a click
    pub click_zoom_level: f64,
    /// Minimum distance from the current target before the camera retargets
    pub move_deadzone_px: f64,
    /// Minimum per-axis movement for a pointer sample to count as activity
    pub activity_deadzone_px: f64,
    /// Per-axis movement from the click anchor that breaks click-lock
    pub click_breakout_px: f64,
    /// Milliseconds without activity before the camera returns to idle
    pub idle_timeout_ms: f64,
    /// Pan lerp factor while zooming in (fast lock-on)
    pub pan_smooth_fast: f64,
    /// Pan lerp factor while zooming out or holding
    pub pan_smooth_slow: f64,
    /// Zoom lerp factor, used in both directions
    pub zoom_smooth: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_idle_level: 1.0,
            zoom_active_level: 1.5,
            click_zoom_level: 2.0,
            move_deadzone_px: 100.0,
            activity_deadzone_px: 60.0,
            click_breakout_px: 20.0,
            idle_timeout_ms: 2000.0,
            pan_smooth_fast: 0.2,
            pan_smooth_slow: 0.04,
            zoom_smooth: 0.04,
        }
    }
}

impl CameraConfig {
    /// Check that zoom levels are ordered and smoothing factors are usable.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.zoom_idle_level <= self.zoom_active_level
            && self.zoom_active_level <= self.click_zoom_level)
        {
            return Err(format!(
                "zoom levels must be ordered: idle {} <= active {} <= click {}",
                self.zoom_idle_level, self.zoom_active_level, self.click_zoom_level
            ));
        }
        if self.zoom_idle_level <= 0.0 {
            return Err("zoom_idle_level must be positive".to_string());
        }
        for (name, factor) in [
            ("pan_smooth_fast", self.pan_smooth_fast),
            ("pan_smooth_slow", self.pan_smooth_slow),
            ("zoom_smooth", self.zoom_smooth),
        ] {
            if !(factor > 0.0 && factor < 1.0) {
                return Err(format!("{} must be in (0, 1), got {}", name, factor));
            }
        }
        Ok(())
    }
}
