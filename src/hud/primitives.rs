// src/hud/primitives.rs - Stateless HUD drawing routines
use std::f32::consts::TAU;

use nalgebra::Point2;

use crate::config::{Color, Palette};
use crate::hud::canvas::{Canvas, Ink, Line};
use crate::landmarks::{LandmarkSet, HAND_CONNECTIONS};

const GLOW_STEP: usize = 3;
const GLOW_OUTER_ALPHA: f32 = 0.08;
const GLOW_ALPHA_RANGE: f32 = 0.12;

const CORE_SAMPLES: usize = 40;
const CORE_LOBES: f32 = 6.0;
const CORE_DOT_RADIUS: f32 = 3.0;

const SKELETON_JOINT_RADIUS: f32 = 3.0;

/// Point at `radius` from `center` along `angle_deg`.
pub fn polar(center: Point2<f32>, radius: f32, angle_deg: f32) -> Point2<f32> {
    let angle = angle_deg.to_radians();
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Opacity of the glow layer `offset` pixels outside the ring. Grows
/// linearly from the outermost layer toward the ring itself.
pub fn glow_alpha(offset: usize, glow: usize) -> f32 {
    if glow == 0 {
        return 0.0;
    }
    GLOW_OUTER_ALPHA + GLOW_ALPHA_RANGE * (1.0 - offset as f32 / glow as f32)
}

/// Translucent rings at `radius + glow`, `radius + glow - 3`, ... down to
/// one pixel out, then the solid ring.
pub fn glow_ring(
    canvas: &mut impl Canvas,
    center: Point2<f32>,
    radius: f32,
    color: Color,
    thickness: f32,
    glow: usize,
) {
    for offset in (1..=glow).rev().step_by(GLOW_STEP) {
        let line = Line {
            ink: Ink::translucent(color, glow_alpha(offset, glow)),
            thickness,
        };
        canvas.stroke_circle(center, radius + offset as f32, line);
    }
    canvas.stroke_circle(center, radius, Line::new(color, thickness));
}

pub fn radial_ticks(
    canvas: &mut impl Canvas,
    center: Point2<f32>,
    radius: f32,
    color: Color,
    num_ticks: usize,
    length: f32,
    thickness: f32,
) {
    let line = Line::new(color, thickness);
    for i in 0..num_ticks {
        let angle = i as f32 * (360.0 / num_ticks as f32);
        canvas.line(
            polar(center, radius - length, angle),
            polar(center, radius, angle),
            line,
        );
    }
}

/// Scalloped ring of dots plus two inner rings.
pub fn core_pattern(canvas: &mut impl Canvas, center: Point2<f32>, radius: f32, palette: &Palette) {
    let dot = Ink::solid(palette.orange);
    for i in 0..CORE_SAMPLES {
        let t = TAU * i as f32 / (CORE_SAMPLES - 1) as f32;
        let r = radius * (0.7 + 0.3 * (CORE_LOBES * t).sin());
        let p = Point2::new(center.x + r * t.cos(), center.y + r * t.sin());
        canvas.fill_circle(p, CORE_DOT_RADIUS, dot);
    }
    canvas.stroke_circle(center, (radius * 0.6).trunc(), Line::new(palette.cyan, 2.0));
    canvas.stroke_circle(center, (radius * 0.4).trunc(), Line::new(palette.orange, 2.0));
}

/// Tick fan on the upper left and a row of squares above the palm.
pub fn hud_details(canvas: &mut impl Canvas, center: Point2<f32>, palette: &Palette) {
    let ticks = Line::new(palette.cyan, 4.0);
    for i in 0..8 {
        let angle = 210.0 + i as f32 * 10.0;
        canvas.line(polar(center, 140.0, angle), polar(center, 170.0, angle), ticks);
    }

    let squares = Line::new(palette.cyan, 2.0);
    for i in 0..4 {
        let p = polar(center, 120.0, 270.0 + i as f32 * 15.0);
        canvas.stroke_rect(
            Point2::new(p.x - 10.0, p.y - 10.0),
            Point2::new(p.x + 10.0, p.y + 10.0),
            squares,
        );
    }
}

pub fn arc_segments(canvas: &mut impl Canvas, center: Point2<f32>, palette: &Palette) {
    canvas.stroke_arc(center, 110.0, -30.0, 210.0, Line::new(palette.cyan, 3.0));
    canvas.stroke_arc(center, 100.0, -30.0, 210.0, Line::new(palette.orange, 2.0));
    canvas.stroke_arc(center, 80.0, 0.0, 360.0, Line::new(palette.cyan, 1.0));
}

/// Five nested sweeps to the right of the palm, each 10 degrees longer.
pub fn pinch_meter(canvas: &mut impl Canvas, palm: Point2<f32>, pinch: u8, color: Color) {
    let center = Point2::new(palm.x + 80.0, palm.y);
    let line = Line::new(color, 2.0);
    for i in 0..5 {
        let end = 180.0 + pinch as f32 + i as f32 * 10.0;
        canvas.stroke_arc(center, 30.0, 180.0, end, line);
    }
}

/// Bones in white, then a red dot on every joint.
pub fn skeleton(canvas: &mut impl Canvas, hand: &LandmarkSet, palette: &Palette) {
    let bone = Line::new(palette.white, 2.0);
    for (a, b) in HAND_CONNECTIONS {
        canvas.line(to_f32(hand.get(a)), to_f32(hand.get(b)), bone);
    }

    let joint = Ink::solid(palette.red);
    for &p in hand.points() {
        canvas.fill_circle(to_f32(p), SKELETON_JOINT_RADIUS, joint);
    }
}

pub(crate) fn to_f32(p: Point2<i32>) -> Point2<f32> {
    Point2::new(p.x as f32, p.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::canvas::recording::{DrawOp, RecordingCanvas};

    const CYAN: Color = Color::rgb(0, 255, 255);

    fn origin() -> Point2<f32> {
        Point2::new(200.0, 200.0)
    }

    #[test]
    fn glow_layers_step_inward_and_brighten() {
        let mut canvas = RecordingCanvas::default();
        glow_ring(&mut canvas, origin(), 60.0, CYAN, 3.0, 10);

        let rings: Vec<(f32, f32)> = canvas
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::StrokeCircle { radius, line, .. } => (*radius, line.ink.alpha),
                other => panic!("unexpected op {:?}", other),
            })
            .collect();

        let radii: Vec<f32> = rings.iter().map(|r| r.0).collect();
        assert_eq!(radii, vec![70.0, 67.0, 64.0, 61.0, 60.0]);

        for pair in rings[..4].windows(2) {
            assert!(pair[1].1 > pair[0].1);
        }
        assert!((rings[0].1 - 0.08).abs() < 1e-6);
        assert!(rings[3].1 < 0.2);
        assert_eq!(rings[4].1, 1.0);
    }

    #[test]
    fn glow_of_zero_is_a_single_ring() {
        let mut canvas = RecordingCanvas::default();
        glow_ring(&mut canvas, origin(), 60.0, CYAN, 2.0, 0);
        assert_eq!(canvas.ops.len(), 1);
    }

    #[test]
    fn radial_ticks_are_evenly_spaced() {
        let mut canvas = RecordingCanvas::default();
        radial_ticks(&mut canvas, origin(), 120.0, CYAN, 24, 22.0, 3.0);
        assert_eq!(canvas.ops.len(), 24);

        match &canvas.ops[6] {
            DrawOp::Line { from, to, .. } => {
                // 6 * 15 degrees points straight down in image space.
                assert!((from.x - 200.0).abs() < 1e-3 && (from.y - 298.0).abs() < 1e-3);
                assert!((to.x - 200.0).abs() < 1e-3 && (to.y - 320.0).abs() < 1e-3);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn core_pattern_draws_forty_dots_and_two_rings() {
        let palette = Palette::default();
        let mut canvas = RecordingCanvas::default();
        core_pattern(&mut canvas, origin(), 35.0, &palette);

        assert_eq!(canvas.count(|op| matches!(op, DrawOp::FillCircle { .. })), 40);
        let rings: Vec<f32> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeCircle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(rings, vec![21.0, 14.0]);

        // Samples stay between 0.4 and 1.0 of the radius.
        for op in &canvas.ops {
            if let DrawOp::FillCircle { center, .. } = op {
                let r = ((center.x - 200.0).powi(2) + (center.y - 200.0).powi(2)).sqrt();
                assert!(r >= 35.0 * 0.4 - 1e-3 && r <= 35.0 + 1e-3);
            }
        }
    }

    #[test]
    fn hud_details_draw_ticks_and_squares() {
        let mut canvas = RecordingCanvas::default();
        hud_details(&mut canvas, origin(), &Palette::default());
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::Line { .. })), 8);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 4);

        match &canvas.ops[8] {
            DrawOp::StrokeRect { min, max, .. } => {
                assert!((max.x - min.x - 20.0).abs() < 1e-3);
                // First square sits straight above the palm.
                assert!(((min.x + max.x) / 2.0 - 200.0).abs() < 1e-3);
                assert!(((min.y + max.y) / 2.0 - 80.0).abs() < 1e-3);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn pinch_meter_sweeps_grow_by_ten_degrees() {
        let mut canvas = RecordingCanvas::default();
        pinch_meter(&mut canvas, origin(), 40, CYAN);

        let sweeps: Vec<(f32, f32, Point2<f32>)> = canvas
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::StrokeArc { start_deg, end_deg, center, .. } => (*start_deg, *end_deg, *center),
                other => panic!("unexpected op {:?}", other),
            })
            .collect();

        assert_eq!(sweeps.len(), 5);
        for (i, (start, end, center)) in sweeps.iter().enumerate() {
            assert_eq!(*start, 180.0);
            assert_eq!(*end, 220.0 + i as f32 * 10.0);
            assert_eq!(*center, Point2::new(280.0, 200.0));
        }
    }

    #[test]
    fn skeleton_draws_every_bone_and_joint() {
        use crate::landmarks::{HandJoint, LANDMARK_COUNT};

        let mut points = [Point2::new(0, 0); LANDMARK_COUNT];
        for (i, p) in points.iter_mut().enumerate() {
            *p = Point2::new(100 + i as i32 * 5, 200 - i as i32 * 3);
        }
        let hand = LandmarkSet::new(points);
        let palette = Palette::default();

        let mut canvas = RecordingCanvas::default();
        skeleton(&mut canvas, &hand, &palette);

        assert_eq!(canvas.count(|op| matches!(op, DrawOp::Line { .. })), HAND_CONNECTIONS.len());
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::FillCircle { .. })), LANDMARK_COUNT);
        assert_eq!(canvas.ops.len(), 21 + 21);

        // The first bone runs from the wrist to the thumb base.
        match &canvas.ops[0] {
            DrawOp::Line { from, to, line } => {
                assert_eq!(*from, to_f32(hand.get(HandJoint::Wrist)));
                assert_eq!(*to, to_f32(hand.get(HandJoint::ThumbCmc)));
                assert_eq!(line.ink.color, palette.white);
            }
            other => panic!("unexpected op {:?}", other),
        }
        match canvas.ops.last().unwrap() {
            DrawOp::FillCircle { center, ink, .. } => {
                assert_eq!(*center, Point2::new(200.0, 140.0));
                assert_eq!(ink.color, palette.red);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn arc_segments_match_the_ring_layout() {
        let mut canvas = RecordingCanvas::default();
        arc_segments(&mut canvas, origin(), &Palette::default());
        let arcs: Vec<(f32, f32, f32)> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeArc { radius, start_deg, end_deg, .. } => Some((*radius, *start_deg, *end_deg)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![(110.0, -30.0, 210.0), (100.0, -30.0, 210.0), (80.0, 0.0, 360.0)]);
    }
}
