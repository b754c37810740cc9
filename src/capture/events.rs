//! Input activity events
//!
//! Pointer and key events come from an out-of-process global observer, so
//! they can land on any thread at any time. They are buffered here and the
//! session drains the queue at the next tick boundary, keeping controller
//! state changes off the middle of a tick.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One input-activity signal from the global observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    /// Pointer position in logical screen coordinates
    PointerMove { x: f64, y: f64 },
    /// A click anywhere on the monitored desktop
    PointerDown,
    /// Any keystroke
    KeyActivity,
}

/// FIFO buffer between the input observer and the tick loop.
#[derive(Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<Vec<InputEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.events.lock().push(event);
    }

    /// Take every queued event, preserving arrival order.
    pub fn drain(&self) -> Vec<InputEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
