//! Pointer activity classification
//!
//! Raw pointer samples arrive at up to 60Hz and are full of micro-jitter.
//! The tracker keeps the last accepted position and only registers a sample
//! as activity once it clears the activity deadzone, so resting a hand on
//! the mouse does not keep the camera zoomed in forever.

/// A pointer sample that cleared the activity deadzone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedSample {
    pub x: f64,
    pub y: f64,
    /// Per-axis displacement from the previously accepted position
    pub dx: f64,
    pub dy: f64,
}

/// Outcome of classifying one raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// First sample after (re)start; seeds the tracker and nothing else
    Seed,
    /// Movement cleared the activity deadzone
    Significant(AcceptedSample),
    /// Micro-jitter below the deadzone, dropped entirely
    Noise,
}

/// Tracks the last accepted pointer position and the last activity time.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    activity_deadzone_px: f64,
    last_accepted: Option<(f64, f64)>,
    last_active_ms: Option<f64>,
}

impl ActivityTracker {
    pub fn new(activity_deadzone_px: f64) -> Self {
        Self {
            activity_deadzone_px,
            last_accepted: None,
            last_active_ms: None,
        }
    }

    /// Forget everything; the next sample will be treated as the first.
    pub fn reset(&mut self) {
        self.last_accepted = None;
        self.last_active_ms = None;
    }

    /// Classify a pointer sample already scaled into frame-pixel space.
    ///
    /// The very first sample only seeds `last_accepted`; it never counts as
    /// activity, so stream startup jitter cannot trigger a zoom-in.
    pub fn classify(&mut self, x: f64, y: f64, now_ms: f64) -> Classification {
        let Some((last_x, last_y)) = self.last_accepted else {
            self.last_accepted = Some((x, y));
            return Classification::Seed;
        };

        let dx = x - last_x;
        let dy = y - last_y;
        if dx.abs().max(dy.abs()) > self.activity_deadzone_px {
            self.last_accepted = Some((x, y));
            self.last_active_ms = Some(now_ms);
            Classification::Significant(AcceptedSample { x, y, dx, dy })
        } else {
            Classification::Noise
        }
    }

    /// Record non-pointer activity (clicks, keystrokes) at `now_ms`.
    pub fn touch(&mut self, now_ms: f64) {
        self.last_active_ms = Some(now_ms);
    }

    /// Last accepted pointer position, if any sample has arrived.
    pub fn last_accepted(&self) -> Option<(f64, f64)> {
        self.last_accepted
    }

    /// Whether the user has been inactive for longer than `timeout_ms`.
    ///
    /// With no activity recorded yet the tracker reports idle, so a session
    /// that receives no input at all stays zoomed out.
    pub fn is_idle(&self, now_ms: f64, timeout_ms: f64) -> bool {
        match self.last_active_ms {
            Some(active) => now_ms - active > timeout_ms,
            None => true,
        }
    }
}
