// src/detector/onnx.rs - Hand landmark model through ONNX Runtime
use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{imageops::FilterType, RgbImage};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use tracing::debug;

use super::roi::Roi;
use super::HandLandmarker;
use crate::config::{ChannelOrder, DetectorConfig, TensorLayout};
use crate::landmarks::{LandmarkSet, LANDMARK_COUNT};

/// Runs a single-hand landmark model over the full frame until a hand is
/// found, then over a crop around the previous hand while it stays present.
pub struct OnnxHandLandmarker {
    session: Session,
    config: DetectorConfig,
    tracked: Vec<LandmarkSet>,
}

struct Candidate {
    hand: LandmarkSet,
    presence: f32,
}

impl OnnxHandLandmarker {
    pub fn new(path: &Path, config: DetectorConfig) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?;

        Ok(Self {
            session,
            config,
            tracked: Vec::new(),
        })
    }

    fn infer(&mut self, frame: &RgbImage, roi: Roi) -> Result<Candidate> {
        let size = self.config.input_size;
        let input_data = preprocess(frame, roi, size, self.config.layout, self.config.channel_order);
        let shape: Vec<i64> = match self.config.layout {
            TensorLayout::Nhwc => vec![1, size as i64, size as i64, 3],
            TensorLayout::Nchw => vec![1, 3, size as i64, size as i64],
        };

        let input = Tensor::from_array((shape, input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;
        if outputs.len() < 2 {
            bail!("model produced {} outputs, expected landmarks and presence", outputs.len());
        }

        let (_, landmarks) = outputs[0].try_extract_tensor::<f32>()?;
        let (_, presence) = outputs[1].try_extract_tensor::<f32>()?;
        let presence = presence.first().copied().context("empty presence output")?;

        let hand = decode_landmarks(landmarks, roi, size, frame.width(), frame.height())?;
        Ok(Candidate {
            hand,
            presence: sigmoid(presence),
        })
    }
}

impl HandLandmarker for OnnxHandLandmarker {
    fn name(&self) -> &str {
        "ONNX hand landmarks"
    }

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<LandmarkSet>> {
        let (width, height) = frame.dimensions();
        let previous = std::mem::take(&mut self.tracked);
        let mut hands = Vec::new();

        for hand in &previous {
            let Some(roi) = Roi::around(hand, self.config.roi_scale, width, height) else {
                continue;
            };
            let candidate = self.infer(frame, roi)?;
            if candidate.presence >= self.config.tracking_confidence {
                hands.push(candidate.hand);
            } else {
                debug!("Lost tracked hand (presence {:.2})", candidate.presence);
            }
        }

        if hands.is_empty() {
            let candidate = self.infer(frame, Roi::full_frame(width, height))?;
            if candidate.presence >= self.config.detection_confidence {
                hands.push(candidate.hand);
            }
        }

        hands.truncate(self.config.max_hands);
        self.tracked = hands.clone();
        Ok(hands)
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Crops `roi`, resizes it to `size` square and flattens it to [0, 1]
/// floats in the requested layout and channel order.
fn preprocess(
    frame: &RgbImage,
    roi: Roi,
    size: u32,
    layout: TensorLayout,
    order: ChannelOrder,
) -> Vec<f32> {
    let crop = image::imageops::crop_imm(frame, roi.x, roi.y, roi.width, roi.height).to_image();
    let resized = image::imageops::resize(&crop, size, size, FilterType::Triangle);

    let channels = match order {
        ChannelOrder::Rgb => [0, 1, 2],
        ChannelOrder::Bgr => [2, 1, 0],
    };
    let mut data = Vec::with_capacity((size * size * 3) as usize);

    match layout {
        TensorLayout::Nhwc => {
            for pixel in resized.pixels() {
                for c in channels {
                    data.push(pixel[c] as f32 / 255.0);
                }
            }
        }
        TensorLayout::Nchw => {
            for c in channels {
                for pixel in resized.pixels() {
                    data.push(pixel[c] as f32 / 255.0);
                }
            }
        }
    }
    data
}

/// Landmarks come as x, y, z triples in model input pixels.
fn decode_landmarks(
    raw: &[f32],
    roi: Roi,
    input_size: u32,
    frame_width: u32,
    frame_height: u32,
) -> Result<LandmarkSet> {
    if raw.len() < LANDMARK_COUNT * 3 {
        bail!("landmark output has {} values, expected {}", raw.len(), LANDMARK_COUNT * 3);
    }

    let size = input_size as f32;
    let normalized: Vec<[f32; 2]> = raw
        .chunks_exact(3)
        .take(LANDMARK_COUNT)
        .map(|xyz| roi.to_frame(xyz[0] / size, xyz[1] / size, frame_width, frame_height))
        .collect();

    LandmarkSet::from_normalized(&normalized, frame_width, frame_height)
        .context("landmark output did not decode to a full hand")
}
