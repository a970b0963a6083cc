// src/pipeline.rs - One frame from camera pixels to annotated output
use std::collections::VecDeque;
use std::time::Instant;

use image::RgbImage;
use tracing::warn;

use crate::config::HudConfig;
use crate::detector::{build_landmarker, HandLandmarker};
use crate::error::Result;
use crate::gesture::{GestureClassifier, GestureReading};
use crate::hud::canvas::Frame;
use crate::hud::text::Typeface;
use crate::hud::HudRenderer;
use crate::video::mirror;

const METRICS_WINDOW: usize = 30;

#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    pub avg_fps: f32,
    pub avg_processing_time: f32,
    frame_times: VecDeque<f32>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            avg_fps: 0.0,
            avg_processing_time: 0.0,
            frame_times: VecDeque::with_capacity(METRICS_WINDOW),
        }
    }

    /// Records one frame's processing time in seconds.
    pub fn record(&mut self, elapsed: f32) {
        self.frame_times.push_front(elapsed);
        if self.frame_times.len() > METRICS_WINDOW {
            self.frame_times.pop_back();
        }

        self.avg_processing_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.avg_fps = if self.avg_processing_time > 0.0 {
            1.0 / self.avg_processing_time
        } else {
            0.0
        };
    }
}

pub struct AnnotatedFrame {
    pub image: RgbImage,
    pub readings: Vec<GestureReading>,
}

pub struct FramePipeline {
    landmarker: Box<dyn HandLandmarker>,
    classifier: GestureClassifier,
    renderer: HudRenderer,
    typeface: Typeface,
    metrics: PerformanceMetrics,
}

impl FramePipeline {
    pub fn new(
        landmarker: Box<dyn HandLandmarker>,
        classifier: GestureClassifier,
        renderer: HudRenderer,
        typeface: Typeface,
    ) -> Self {
        Self {
            landmarker,
            classifier,
            renderer,
            typeface,
            metrics: PerformanceMetrics::new(),
        }
    }

    pub fn from_config(config: &HudConfig) -> Self {
        Self::new(
            build_landmarker(&config.detector),
            GestureClassifier::new(config.gestures.clone()),
            HudRenderer::new(config.palette.clone()).with_skeleton(config.show_skeleton),
            Typeface::load(config.font_path.as_deref()),
        )
    }

    pub fn landmarker_name(&self) -> &str {
        self.landmarker.name()
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Mirrors the frame, finds hands and paints one HUD per hand.
    /// A landmarker failure costs the frame its overlay, not the frame.
    pub fn process(&mut self, frame: &RgbImage) -> Result<AnnotatedFrame> {
        let start = Instant::now();
        let mirrored = mirror(frame);

        let hands = match self.landmarker.detect(&mirrored) {
            Ok(hands) => hands,
            Err(e) => {
                warn!("Hand landmark extraction failed: {e:#}");
                Vec::new()
            }
        };

        let mut canvas = Frame::from_rgb(&mirrored, &self.typeface)?;
        let mut readings = Vec::with_capacity(hands.len());
        for hand in &hands {
            let reading = self.classifier.classify(hand);
            self.renderer.render(&mut canvas, hand, &reading);
            readings.push(reading);
        }

        self.metrics.record(start.elapsed().as_secs_f32());
        Ok(AnnotatedFrame {
            image: canvas.into_rgb(),
            readings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Gesture;
    use crate::landmarks::{HandJoint, LandmarkSet, LANDMARK_COUNT};
    use image::Rgb;
    use nalgebra::Point2;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FixedHands(Vec<LandmarkSet>);

    impl HandLandmarker for FixedHands {
        fn name(&self) -> &str {
            "fixed"
        }

        fn detect(&mut self, _frame: &RgbImage) -> anyhow::Result<Vec<LandmarkSet>> {
            Ok(self.0.clone())
        }
    }

    /// Keeps a copy of every frame it is handed.
    struct SeenFrames(Rc<RefCell<Vec<RgbImage>>>);

    impl HandLandmarker for SeenFrames {
        fn name(&self) -> &str {
            "seen"
        }

        fn detect(&mut self, frame: &RgbImage) -> anyhow::Result<Vec<LandmarkSet>> {
            self.0.borrow_mut().push(frame.clone());
            Ok(Vec::new())
        }
    }

    struct Failing;

    impl HandLandmarker for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn detect(&mut self, _frame: &RgbImage) -> anyhow::Result<Vec<LandmarkSet>> {
            anyhow::bail!("inference exploded")
        }
    }

    fn pipeline(landmarker: Box<dyn HandLandmarker>) -> FramePipeline {
        FramePipeline::new(
            landmarker,
            GestureClassifier::default(),
            HudRenderer::default(),
            Typeface::Bitmap,
        )
    }

    fn gradient() -> RgbImage {
        RgbImage::from_fn(64, 48, |x, y| Rgb([x as u8 * 3, y as u8 * 5, 90]))
    }

    fn fist_at(x: i32, y: i32) -> LandmarkSet {
        let mut points = [Point2::new(x, y); LANDMARK_COUNT];
        for tip in HandJoint::FINGERTIPS {
            points[tip.index()] = Point2::new(x, y + 70);
        }
        LandmarkSet::new(points)
    }

    #[test]
    fn no_hands_gives_the_mirrored_frame() {
        let frame = gradient();
        let mut pipeline = pipeline(Box::new(FixedHands(Vec::new())));
        let out = pipeline.process(&frame).unwrap();

        assert!(out.readings.is_empty());
        assert_eq!(out.image, mirror(&frame));
    }

    #[test]
    fn landmarks_come_from_the_mirrored_frame() {
        let frame = gradient();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = pipeline(Box::new(SeenFrames(Rc::clone(&seen))));
        pipeline.process(&frame).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], mirror(&frame));
        assert_ne!(seen[0], frame);
    }

    #[test]
    fn landmarker_errors_drop_only_the_overlay() {
        let frame = gradient();
        let mut pipeline = pipeline(Box::new(Failing));
        let out = pipeline.process(&frame).unwrap();

        assert!(out.readings.is_empty());
        assert_eq!(out.image, mirror(&frame));
    }

    #[test]
    fn each_hand_is_classified_and_drawn() {
        let frame = RgbImage::new(320, 240);
        let hands = vec![fist_at(100, 100), fist_at(220, 120)];
        let mut pipeline = pipeline(Box::new(FixedHands(hands)));
        let out = pipeline.process(&frame).unwrap();

        assert_eq!(out.readings.len(), 2);
        assert!(out.readings.iter().all(|r| r.gesture == Gesture::Fist));
        assert_eq!(out.readings[1].palm, Point2::new(220, 120));
        // The solid ring passes 60px to the left of the first palm.
        let ring = out.image.get_pixel(40, 100);
        assert!(ring[1] > 200 && ring[2] > 200, "expected cyan, got {:?}", ring);
        assert_eq!(pipeline.metrics().frame_times.len(), 1);
    }

    #[test]
    fn metrics_average_over_a_sliding_window() {
        let mut metrics = PerformanceMetrics::new();
        for _ in 0..METRICS_WINDOW {
            metrics.record(1.0);
        }
        for _ in 0..METRICS_WINDOW {
            metrics.record(0.05);
        }
        assert_eq!(metrics.frame_times.len(), METRICS_WINDOW);
        assert!((metrics.avg_fps - 20.0).abs() < 1e-3);
    }
}
