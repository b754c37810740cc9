//! Frame composition under the camera transform
//!
//! The compositor is a pure function of (camera transform, raw frame): it
//! holds no state, so one render per tick keeps the output cadence constant
//! regardless of what the camera or capture source are doing.

use crate::camera::CameraState;
use crate::compose::frame::{CapturedFrame, ComposedFrame, Resolution};

/// Render one output frame.
///
/// Output pixel `(ox, oy)` samples the source at
/// `camera.{x,y} + (out - out_center) / camera.zoom` (nearest neighbor),
/// which is the translate-center, scale, translate-back transform of a
/// canvas renderer. A missing source frame produces a solid black frame
/// rather than stalling the tick.
pub fn render(
    camera: CameraState,
    source: Option<&CapturedFrame>,
    output: Resolution,
    timestamp_ms: f64,
) -> ComposedFrame {
    let Some(source) = source else {
        return ComposedFrame::black(output, timestamp_ms);
    };

    let mut composed = ComposedFrame::black(output, timestamp_ms);

    let out_w = output.width as usize;
    let out_h = output.height as usize;
    let center_x = output.width as f64 / 2.0;
    let center_y = output.height as f64 / 2.0;
    let src_w = source.width as i64;
    let src_h = source.height as i64;
    let stride = source.bytes_per_row as usize;

    for oy in 0..out_h {
        let sy = camera.y + (oy as f64 + 0.5 - center_y) / camera.zoom;
        let sy = sy.floor() as i64;
        if sy < 0 || sy >= src_h {
            continue;
        }
        let row_start = sy as usize * stride;
        let out_row = &mut composed.data[oy * out_w * 4..(oy + 1) * out_w * 4];
        for ox in 0..out_w {
            let sx = camera.x + (ox as f64 + 0.5 - center_x) / camera.zoom;
            let sx = sx.floor() as i64;
            if sx < 0 || sx >= src_w {
                continue;
            }
            let idx = row_start + sx as usize * 4;
            // Guards against undersized buffers from a misbehaving source
            let Some(src) = source.data.get(idx..idx + 4) else {
                continue;
            };
            out_row[ox * 4..ox * 4 + 4].copy_from_slice(src);
        }
    }

    composed
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUT: Resolution = Resolution {
        width: 8,
        height: 8,
    };

    /// 8x8 BGRA frame where each pixel encodes its own coordinates.
    fn coordinate_frame() -> CapturedFrame {
        let mut data = vec![0u8; 8 * 8 * 4];
        for y in 0..8u8 {
            for x in 0..8u8 {
                let i = (y as usize * 8 + x as usize) * 4;
                data[i] = x;
                data[i + 1] = y;
                data[i + 2] = 0;
                data[i + 3] = 0xff;
            }
        }
        CapturedFrame {
            data,
            width: 8,
            height: 8,
            timestamp_ms: 0.0,
            bytes_per_row: 32,
        }
    }

    fn pixel(frame: &ComposedFrame, x: usize, y: usize) -> (u8, u8) {
        let i = (y * frame.width as usize + x) * 4;
        (frame.data[i], frame.data[i + 1])
    }

    #[test]
    fn test_missing_source_yields_black_frame() {
        let camera = CameraState { x: 4.0, y: 4.0, zoom: 1.0 };
        let frame = render(camera, None, OUT, 42.0);
        assert_eq!(frame.width, 8);
        assert_eq!(frame.height, 8);
        assert_eq!(frame.timestamp_ms, 42.0);
        assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 0xff]));
    }

    #[test]
    fn test_identity_transform_copies_source() {
        let source = coordinate_frame();
        let camera = CameraState { x: 4.0, y: 4.0, zoom: 1.0 };
        let frame = render(camera, Some(&source), OUT, 0.0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(pixel(&frame, x, y), (x as u8, y as u8));
            }
        }
    }

    #[test]
    fn test_zoom_magnifies_around_camera_center() {
        let source = coordinate_frame();
        let camera = CameraState { x: 4.0, y: 4.0, zoom: 2.0 };
        let frame = render(camera, Some(&source), OUT, 0.0);
        // At zoom 2 the visible viewport is the central 4x4 region, each
        // source pixel covering a 2x2 output block.
        assert_eq!(pixel(&frame, 0, 0), (2, 2));
        assert_eq!(pixel(&frame, 1, 1), (2, 2));
        assert_eq!(pixel(&frame, 7, 7), (5, 5));
        assert_eq!(pixel(&frame, 4, 4), (4, 4));
    }

    #[test]
    fn test_out_of_bounds_samples_stay_black() {
        let source = coordinate_frame();
        // Camera pushed past the left edge (the controller never does this,
        // but the compositor must not index out of bounds if it happens)
        let camera = CameraState { x: 0.0, y: 4.0, zoom: 1.0 };
        let frame = render(camera, Some(&source), OUT, 0.0);
        assert_eq!(frame.data[0..4], [0, 0, 0, 0xff]);
        // Right half still maps into the source
        assert_eq!(pixel(&frame, 7, 0), (3, 0));
    }

    #[test]
    fn test_respects_row_padding() {
        let mut source = coordinate_frame();
        // Add 8 bytes of padding per row
        let mut padded = Vec::new();
        for row in source.data.chunks_exact(32) {
            padded.extend_from_slice(row);
            padded.extend_from_slice(&[0xee; 8]);
        }
        source.data = padded;
        source.bytes_per_row = 40;

        let camera = CameraState { x: 4.0, y: 4.0, zoom: 1.0 };
        let frame = render(camera, Some(&source), OUT, 0.0);
        assert_eq!(pixel(&frame, 7, 7), (7, 7));
    }
}
