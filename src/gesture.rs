// src/gesture.rs - Landmark geometry to gesture label
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::landmarks::{HandJoint, LandmarkSet};

/// Keeps the angle readout finite when either vector has zero length.
const ANGLE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Open,
    Pinch,
    Fist,
}

impl Gesture {
    pub fn label(self) -> &'static str {
        match self {
            Gesture::Open => "OPEN",
            Gesture::Pinch => "PINCH",
            Gesture::Fist => "FIST",
        }
    }
}

/// Pixel-space thresholds. The defaults assume a webcam at arm's length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Mean fingertip-to-palm distance above which the hand is open.
    pub open_spread: f64,
    /// Pinch intensity below which a closed hand reads as a pinch.
    pub pinch_below: u8,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            open_spread: 70.0,
            pinch_below: 60,
        }
    }
}

/// Raw measurements the rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandMeasurements {
    pub avg_tip_distance: f64,
    pub pinch_distance: f64,
    pub pinch: u8,
}

impl HandMeasurements {
    pub fn measure(hand: &LandmarkSet) -> Self {
        let palm = hand.palm();
        let avg_tip_distance = hand
            .fingertips()
            .map(|tip| distance(palm, tip))
            .sum::<f64>()
            / HandJoint::FINGERTIPS.len() as f64;

        let pinch_distance = distance(
            hand.get(HandJoint::ThumbTip),
            hand.get(HandJoint::IndexTip),
        );

        Self {
            avg_tip_distance,
            pinch_distance,
            pinch: pinch_intensity(pinch_distance),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureReading {
    pub gesture: Gesture,
    pub palm: Point2<i32>,
    pub pinch: u8,
    pub measurements: HandMeasurements,
}

pub struct GestureRule {
    pub gesture: Gesture,
    pub matches: fn(&HandMeasurements, &GestureThresholds) -> bool,
}

/// Evaluated top to bottom; the first match wins. An open hand takes
/// priority over a pinch, and the last rule always matches.
pub const GESTURE_RULES: [GestureRule; 3] = [
    GestureRule {
        gesture: Gesture::Open,
        matches: |m, t| m.avg_tip_distance > t.open_spread,
    },
    GestureRule {
        gesture: Gesture::Pinch,
        matches: |m, t| m.pinch < t.pinch_below,
    },
    GestureRule {
        gesture: Gesture::Fist,
        matches: |_, _| true,
    },
];

#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, hand: &LandmarkSet) -> GestureReading {
        let measurements = HandMeasurements::measure(hand);
        let gesture = GESTURE_RULES
            .iter()
            .find(|rule| (rule.matches)(&measurements, &self.thresholds))
            .map(|rule| rule.gesture)
            .unwrap_or(Gesture::Fist);

        GestureReading {
            gesture,
            palm: hand.palm(),
            pinch: measurements.pinch,
            measurements,
        }
    }
}

/// `100 - min(distance, 100)`, truncated and kept in [0, 100].
pub fn pinch_intensity(pinch_distance: f64) -> u8 {
    if pinch_distance.is_nan() {
        return 0;
    }
    let value = (100.0 - pinch_distance.clamp(0.0, 100.0)).trunc();
    value.clamp(0.0, 100.0) as u8
}

/// Angle at `palm` between the thumb and index tips, in whole degrees.
pub fn thumb_index_angle(palm: Point2<i32>, thumb_tip: Point2<i32>, index_tip: Point2<i32>) -> i32 {
    let v1 = (thumb_tip - palm).cast::<f64>();
    let v2 = (index_tip - palm).cast::<f64>();
    vector_angle_degrees(&v1, &v2)
}

pub fn vector_angle_degrees(v1: &Vector2<f64>, v2: &Vector2<f64>) -> i32 {
    let cos_angle = (v1.dot(v2) / (v1.norm() * v2.norm() + ANGLE_EPSILON)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees() as i32
}

fn distance(a: Point2<i32>, b: Point2<i32>) -> f64 {
    (b - a).cast::<f64>().norm()
}
