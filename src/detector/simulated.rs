// src/detector/simulated.rs - Synthetic hand for running without a model
use anyhow::Result;
use image::RgbImage;
use nalgebra::{Point2, Vector2};

use super::HandLandmarker;
use crate::landmarks::{HandJoint, LandmarkSet, LANDMARK_COUNT};

/// Frames spent in each pose before moving to the next.
const FRAMES_PER_POSE: u64 = 90;

/// Direction of each finger from the palm, thumb first, in image degrees.
const FINGER_ANGLES: [f32; 5] = [200.0, 245.0, 270.0, 295.0, 325.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pose {
    Open,
    Pinch,
    Fist,
}

/// Cycles one hand through open, pinch and fist in the middle of the frame.
pub struct SimulatedHands {
    frame_counter: u64,
    max_hands: usize,
}

impl SimulatedHands {
    pub const NAME: &'static str = "Simulated hand";

    pub fn new(max_hands: usize) -> Self {
        Self {
            frame_counter: 0,
            max_hands,
        }
    }

    fn pose(&self) -> Pose {
        match (self.frame_counter / FRAMES_PER_POSE) % 3 {
            0 => Pose::Open,
            1 => Pose::Pinch,
            _ => Pose::Fist,
        }
    }
}

impl HandLandmarker for SimulatedHands {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<LandmarkSet>> {
        let pose = self.pose();
        let t = self.frame_counter as f32 * 0.05;
        self.frame_counter += 1;

        if self.max_hands == 0 {
            return Ok(Vec::new());
        }

        let palm = Point2::new(
            frame.width() as f32 / 2.0 + 40.0 * t.sin(),
            frame.height() as f32 / 2.0 + 20.0 * (t * 0.7).cos(),
        );
        Ok(vec![synthetic_hand(palm, pose)])
    }
}

fn offset(angle_deg: f32, length: f32) -> Vector2<f32> {
    let a = angle_deg.to_radians();
    Vector2::new(a.cos(), a.sin()) * length
}

/// Fingertip offsets from the palm for each pose, thumb first.
fn fingertips(pose: Pose) -> [Vector2<f32>; 5] {
    match pose {
        Pose::Open => FINGER_ANGLES.map(|a| offset(a, 120.0)),
        // Thumb and index ~46px apart, the rest curled in.
        Pose::Pinch => [
            offset(200.0, 40.0),
            offset(270.0, 40.0),
            offset(260.0, 30.0),
            offset(285.0, 30.0),
            offset(310.0, 30.0),
        ],
        Pose::Fist => [
            offset(250.0, 30.0),
            offset(260.0, 30.0),
            offset(270.0, 25.0),
            offset(290.0, 25.0),
            offset(310.0, 25.0),
        ],
    }
}

fn synthetic_hand(palm: Point2<f32>, pose: Pose) -> LandmarkSet {
    let wrist = palm + Vector2::new(0.0, 90.0);
    let tips = fingertips(pose);

    let mut points = [Point2::new(0.0_f32, 0.0); LANDMARK_COUNT];
    points[HandJoint::Wrist.index()] = wrist;

    // Each finger is four joints from its base to its tip, thumb first.
    for (finger, (tip, angle)) in tips.iter().zip(FINGER_ANGLES).enumerate() {
        let base = if finger == 0 {
            wrist + (palm - wrist) * 0.4 + offset(angle, 20.0)
        } else if finger == 2 {
            palm
        } else {
            palm + offset(angle, 20.0)
        };
        let tip = palm + *tip;
        let first = 1 + finger * 4;
        for step in 0..4 {
            let k = step as f32 / 3.0;
            points[first + step] = base + (tip - base) * k;
        }
    }

    LandmarkSet::new(points.map(|p| Point2::new(p.x as i32, p.y as i32)))
}
