// src/landmarks.rs - Hand landmark layout shared by the detector, classifier and HUD
use nalgebra::Point2;

/// Number of keypoints the hand landmark model emits per hand.
pub const LANDMARK_COUNT: usize = 21;

/// MediaPipe hand landmark ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandJoint {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandJoint {
    pub const ALL: [HandJoint; LANDMARK_COUNT] = [
        HandJoint::Wrist,
        HandJoint::ThumbCmc,
        HandJoint::ThumbMcp,
        HandJoint::ThumbIp,
        HandJoint::ThumbTip,
        HandJoint::IndexMcp,
        HandJoint::IndexPip,
        HandJoint::IndexDip,
        HandJoint::IndexTip,
        HandJoint::MiddleMcp,
        HandJoint::MiddlePip,
        HandJoint::MiddleDip,
        HandJoint::MiddleTip,
        HandJoint::RingMcp,
        HandJoint::RingPip,
        HandJoint::RingDip,
        HandJoint::RingTip,
        HandJoint::PinkyMcp,
        HandJoint::PinkyPip,
        HandJoint::PinkyDip,
        HandJoint::PinkyTip,
    ];

    /// The anchor every HUD element is drawn around.
    pub const PALM: HandJoint = HandJoint::MiddleMcp;

    pub const FINGERTIPS: [HandJoint; 5] = [
        HandJoint::ThumbTip,
        HandJoint::IndexTip,
        HandJoint::MiddleTip,
        HandJoint::RingTip,
        HandJoint::PinkyTip,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Bones of the MediaPipe hand drawing: palm outline, then each finger
/// from its base to its tip.
pub const HAND_CONNECTIONS: [(HandJoint, HandJoint); 21] = {
    use HandJoint::*;
    [
        (Wrist, ThumbCmc),
        (Wrist, IndexMcp),
        (IndexMcp, MiddleMcp),
        (MiddleMcp, RingMcp),
        (RingMcp, PinkyMcp),
        (Wrist, PinkyMcp),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        (IndexMcp, IndexPip),
        (IndexPip, IndexDip),
        (IndexDip, IndexTip),
        (MiddleMcp, MiddlePip),
        (MiddlePip, MiddleDip),
        (MiddleDip, MiddleTip),
        (RingMcp, RingPip),
        (RingPip, RingDip),
        (RingDip, RingTip),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// One detected hand in frame pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkSet {
    points: [Point2<i32>; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point2<i32>; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Scales model output in [0, 1] to pixels, truncating toward zero.
    pub fn from_normalized(normalized: &[[f32; 2]], width: u32, height: u32) -> Option<Self> {
        if normalized.len() != LANDMARK_COUNT {
            return None;
        }

        let mut points = [Point2::origin(); LANDMARK_COUNT];
        for (point, [x, y]) in points.iter_mut().zip(normalized) {
            *point = Point2::new((x * width as f32) as i32, (y * height as f32) as i32);
        }
        Some(Self { points })
    }

    pub fn get(&self, joint: HandJoint) -> Point2<i32> {
        self.points[joint.index()]
    }

    pub fn palm(&self) -> Point2<i32> {
        self.get(HandJoint::PALM)
    }

    pub fn fingertips(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        HandJoint::FINGERTIPS.iter().map(move |&joint| self.get(joint))
    }

    pub fn points(&self) -> &[Point2<i32>; LANDMARK_COUNT] {
        &self.points
    }

    /// Axis-aligned bounds as (min, max).
    pub fn bounds(&self) -> (Point2<i32>, Point2<i32>) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}
