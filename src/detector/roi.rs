// src/detector/roi.rs - Crop regions fed to the landmark model
use crate::landmarks::LandmarkSet;

/// Smallest tracking crop, in pixels.
const MIN_ROI_SIDE: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Square crop centred on the hand, `scale` times its longer side,
    /// clipped to the frame.
    pub fn around(hand: &LandmarkSet, scale: f32, frame_width: u32, frame_height: u32) -> Option<Self> {
        let (min, max) = hand.bounds();
        let cx = (min.x + max.x) as f32 / 2.0;
        let cy = (min.y + max.y) as f32 / 2.0;
        let side = ((max.x - min.x).max(max.y - min.y) as f32 * scale).max(MIN_ROI_SIDE);

        let x0 = (cx - side / 2.0).max(0.0);
        let y0 = (cy - side / 2.0).max(0.0);
        let x1 = (cx + side / 2.0).min(frame_width as f32);
        let y1 = (cy + side / 2.0).min(frame_height as f32);
        if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
            return None;
        }

        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Maps a point normalized to this crop into frame-normalized [0, 1].
    pub fn to_frame(&self, nx: f32, ny: f32, frame_width: u32, frame_height: u32) -> [f32; 2] {
        [
            ((self.x as f32 + nx * self.width as f32) / frame_width as f32).clamp(0.0, 1.0),
            ((self.y as f32 + ny * self.height as f32) / frame_height as f32).clamp(0.0, 1.0),
        ]
    }
}
