// src/hud/mod.rs - Gesture-driven overlay composition
pub mod canvas;
pub mod primitives;
pub mod text;

use nalgebra::Point2;

use crate::config::Palette;
use crate::gesture::{thumb_index_angle, Gesture, GestureReading};
use crate::landmarks::{HandJoint, LandmarkSet};

use canvas::{Canvas, Ink, Line, TextStyle};
use primitives::{
    arc_segments, core_pattern, glow_ring, hud_details, pinch_meter, radial_ticks, skeleton, to_f32,
};

const FINGERTIP_DOT_RADIUS: f32 = 12.0;

pub struct HudRenderer {
    palette: Palette,
    show_skeleton: bool,
}

impl HudRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            show_skeleton: false,
        }
    }

    pub fn with_skeleton(mut self, show: bool) -> Self {
        self.show_skeleton = show;
        self
    }

    /// Paints the overlay for one hand, over its skeleton when enabled.
    pub fn render(&self, canvas: &mut impl Canvas, hand: &LandmarkSet, reading: &GestureReading) {
        if self.show_skeleton {
            skeleton(canvas, hand, &self.palette);
        }

        let palm = to_f32(reading.palm);
        match reading.gesture {
            Gesture::Open => self.render_open(canvas, hand, palm),
            Gesture::Pinch => self.render_pinch(canvas, palm, reading.pinch),
            Gesture::Fist => self.render_fist(canvas, palm),
        }
    }

    fn render_open(&self, canvas: &mut impl Canvas, hand: &LandmarkSet, palm: Point2<f32>) {
        let p = &self.palette;
        glow_ring(canvas, palm, 120.0, p.cyan, 3.0, 30);
        glow_ring(canvas, palm, 90.0, p.cyan, 2.0, 20);
        glow_ring(canvas, palm, 60.0, p.orange, 2.0, 10);
        radial_ticks(canvas, palm, 120.0, p.cyan, 24, 22.0, 3.0);
        core_pattern(canvas, palm, 35.0, p);
        hud_details(canvas, palm, p);
        arc_segments(canvas, palm, p);

        for tip in hand.fingertips() {
            let tip = to_f32(tip);
            canvas.line(palm, tip, Line::new(p.cyan, 2.0));
            canvas.fill_circle(tip, FINGERTIP_DOT_RADIUS, Ink::solid(p.orange));
        }

        let angle = thumb_index_angle(
            hand.palm(),
            hand.get(HandJoint::ThumbTip),
            hand.get(HandJoint::IndexTip),
        );
        canvas.text(
            &format!("{angle}°"),
            Point2::new(palm.x + 40.0, palm.y - 40.0),
            TextStyle {
                color: p.white,
                scale: 1.5,
                thickness: 4,
            },
        );
    }

    fn render_pinch(&self, canvas: &mut impl Canvas, palm: Point2<f32>, pinch: u8) {
        let p = &self.palette;
        glow_ring(canvas, palm, 60.0, p.orange, 3.0, 20);
        canvas.text(
            &format!("Pinch: {pinch}"),
            Point2::new(palm.x - 40.0, palm.y - 70.0),
            TextStyle {
                color: p.orange,
                scale: 1.0,
                thickness: 3,
            },
        );
        pinch_meter(canvas, palm, pinch, p.orange);
    }

    fn render_fist(&self, canvas: &mut impl Canvas, palm: Point2<f32>) {
        let p = &self.palette;
        glow_ring(canvas, palm, 60.0, p.cyan, 3.0, 20);
        canvas.text(
            "FIST",
            Point2::new(palm.x - 30.0, palm.y - 70.0),
            TextStyle {
                color: p.orange,
                scale: 1.0,
                thickness: 3,
            },
        );
    }
}

impl Default for HudRenderer {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureClassifier;
    use crate::landmarks::LANDMARK_COUNT;
    use canvas::recording::{DrawOp, RecordingCanvas};

    fn hand(palm: (i32, i32), tips: [(i32, i32); 5]) -> LandmarkSet {
        let mut points = [Point2::new(palm.0, palm.1); LANDMARK_COUNT];
        for (joint, (x, y)) in HandJoint::FINGERTIPS.iter().zip(tips) {
            points[joint.index()] = Point2::new(x, y);
        }
        LandmarkSet::new(points)
    }

    fn render(set: &LandmarkSet) -> (GestureReading, RecordingCanvas) {
        let reading = GestureClassifier::default().classify(set);
        let mut canvas = RecordingCanvas::default();
        HudRenderer::default().render(&mut canvas, set, &reading);
        (reading, canvas)
    }

    #[test]
    fn open_hand_draws_the_full_hud() {
        let set = hand(
            (300, 300),
            [(400, 300), (300, 200), (250, 180), (200, 220), (180, 300)],
        );
        let (reading, canvas) = render(&set);
        assert_eq!(reading.gesture, Gesture::Open);

        // Glow rings 30/20/10 give 10 + 7 + 4 layers, plus three solid rings
        // and the two core rings.
        assert_eq!(
            canvas.count(|op| matches!(op, DrawOp::StrokeCircle { .. })),
            10 + 7 + 4 + 3 + 2
        );
        // 40 core dots and one dot per fingertip.
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::FillCircle { .. })), 45);
        // 24 radial ticks, 8 detail ticks, 5 fingertip spokes.
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::Line { .. })), 37);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 4);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeArc { .. })), 3);
        assert_eq!(canvas.texts(), vec!["90°"]);

        let text_origin = canvas.ops.iter().find_map(|op| match op {
            DrawOp::Text { origin, style, .. } => Some((*origin, *style)),
            _ => None,
        });
        let (origin, style) = text_origin.unwrap();
        assert_eq!(origin, Point2::new(340.0, 260.0));
        assert_eq!(style.scale, 1.5);
        assert_eq!(style.color, Palette::default().white);
    }

    #[test]
    fn pinch_shows_intensity_and_meter() {
        let set = hand(
            (100, 100),
            [(75, 100), (125, 100), (100, 120), (100, 80), (110, 110)],
        );
        let (reading, canvas) = render(&set);
        assert_eq!(reading.gesture, Gesture::Pinch);

        assert_eq!(canvas.texts(), vec!["Pinch: 50"]);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeArc { .. })), 5);
        // Glow of 20 has layers at +20, +17, ... +2, then the solid ring.
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeCircle { .. })), 8);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::Line { .. })), 0);

        let solid = canvas.ops.iter().find_map(|op| match op {
            DrawOp::StrokeCircle { radius, line, .. } if line.ink.alpha == 1.0 => Some((*radius, *line)),
            _ => None,
        });
        let (radius, line) = solid.unwrap();
        assert_eq!(radius, 60.0);
        assert_eq!(line.ink.color, Palette::default().orange);
    }

    #[test]
    fn fist_shows_a_label_only() {
        let set = hand((100, 100), [(100, 170); 5]);
        let (reading, canvas) = render(&set);
        assert_eq!(reading.gesture, Gesture::Fist);

        assert_eq!(canvas.texts(), vec!["FIST"]);
        assert_eq!(canvas.ops.len(), 9);
        match canvas.ops.last().unwrap() {
            DrawOp::Text { origin, .. } => assert_eq!(*origin, Point2::new(70.0, 30.0)),
            other => panic!("unexpected op {:?}", other),
        }
        let solid_color = canvas.ops.iter().find_map(|op| match op {
            DrawOp::StrokeCircle { line, .. } if line.ink.alpha == 1.0 => Some(line.ink.color),
            _ => None,
        });
        assert_eq!(solid_color, Some(Palette::default().cyan));
    }

    #[test]
    fn skeleton_is_drawn_first_only_when_enabled() {
        let set = hand((100, 100), [(100, 170); 5]);
        let reading = GestureClassifier::default().classify(&set);

        let mut plain = RecordingCanvas::default();
        HudRenderer::default().render(&mut plain, &set, &reading);
        assert_eq!(plain.count(|op| matches!(op, DrawOp::Line { .. })), 0);

        let mut canvas = RecordingCanvas::default();
        HudRenderer::default()
            .with_skeleton(true)
            .render(&mut canvas, &set, &reading);

        assert_eq!(canvas.ops.len(), plain.ops.len() + 21 + LANDMARK_COUNT);
        assert!(canvas.ops[..21].iter().all(|op| matches!(op, DrawOp::Line { .. })));
        assert_eq!(canvas.ops[21 + LANDMARK_COUNT..], plain.ops[..]);
    }

    #[test]
    fn custom_palette_reaches_the_canvas() {
        let palette = Palette {
            orange: crate::config::Color::rgb(1, 2, 3),
            ..Palette::default()
        };
        let set = hand((100, 100), [(100, 170); 5]);
        let reading = GestureClassifier::default().classify(&set);
        let mut canvas = RecordingCanvas::default();
        HudRenderer::new(palette.clone()).render(&mut canvas, &set, &reading);

        match canvas.ops.last().unwrap() {
            DrawOp::Text { style, .. } => assert_eq!(style.color, palette.orange),
            other => panic!("unexpected op {:?}", other),
        }
    }
}
