use serde::{Deserialize, Serialize};

/// Pixel dimensions of a frame or display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Frame data from a capture source
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Raw pixel data (BGRA format)
    pub data: Vec<u8>,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Timestamp in milliseconds (process time)
    pub timestamp_ms: f64,

    /// Bytes per row (may include padding)
    pub bytes_per_row: u32,
}

impl CapturedFrame {
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}

/// One composed output frame, always tightly packed BGRA.
#[derive(Debug, Clone)]
pub struct ComposedFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp_ms: f64,
}

impl ComposedFrame {
    /// Solid black frame, emitted when the source has no frame ready yet.
    pub fn black(resolution: Resolution, timestamp_ms: f64) -> Self {
        let mut data = vec![0u8; resolution.width as usize * resolution.height as usize * 4];
        // Opaque alpha
        for px in data.chunks_exact_mut(4) {
            px[3] = 0xff;
        }
        Self {
            data,
            width: resolution.width,
            height: resolution.height,
            timestamp_ms,
        }
    }
}
