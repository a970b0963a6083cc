// src/detector/mod.rs - Hand landmark extraction behind a narrow trait
#[cfg(feature = "onnx")]
mod onnx;
mod roi;
mod simulated;

#[cfg(feature = "onnx")]
pub use onnx::OnnxHandLandmarker;
pub use roi::Roi;
pub use simulated::SimulatedHands;

use anyhow::Result;
use image::RgbImage;
use tracing::{info, warn};

use crate::config::DetectorConfig;
use crate::landmarks::LandmarkSet;

/// Finds hands in a frame. Implementations may carry state between calls
/// (e.g. a tracking crop), but every returned set is fresh pixel data.
pub trait HandLandmarker {
    fn name(&self) -> &str;

    /// Up to the configured maximum of hands; empty when none are found.
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<LandmarkSet>>;
}

/// Reports no hands. Stands in when no landmark model is available and
/// simulation is off, so the camera feed is shown without an overlay.
pub struct NoHands;

impl NoHands {
    pub const NAME: &'static str = "No landmark model";
}

impl HandLandmarker for NoHands {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<LandmarkSet>> {
        Ok(Vec::new())
    }
}

/// The simulated hand when asked for, else the model-backed landmarker when
/// a model is configured and loads, else one that never finds a hand.
pub fn build_landmarker(config: &DetectorConfig) -> Box<dyn HandLandmarker> {
    if config.simulate {
        info!("Using simulated hand landmarks");
        return Box::new(SimulatedHands::new(config.max_hands));
    }

    match config.model_path.as_deref() {
        Some(path) if path.exists() => {
            #[cfg(feature = "onnx")]
            {
                match OnnxHandLandmarker::new(path, config.clone()) {
                    Ok(landmarker) => {
                        info!("Hand landmark model loaded from {}", path.display());
                        return Box::new(landmarker);
                    }
                    Err(e) => warn!("Failed to load hand landmark model: {e:#}"),
                }
            }
            #[cfg(not(feature = "onnx"))]
            warn!(
                "Built without the `onnx` feature, ignoring model {}",
                path.display()
            );
        }
        Some(path) => warn!("Hand landmark model {} does not exist", path.display()),
        None => info!("No hand landmark model configured"),
    }

    warn!("No hands will be detected; pass --model or --simulate");
    Box::new(NoHands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn finds_no_hands_without_a_model() {
        let mut landmarker = build_landmarker(&DetectorConfig::default());
        assert_eq!(landmarker.name(), NoHands::NAME);
        assert!(landmarker.detect(&RgbImage::new(640, 480)).unwrap().is_empty());
    }

    #[test]
    fn missing_model_file_finds_no_hands() {
        let config = DetectorConfig {
            model_path: Some(PathBuf::from("/nonexistent/hand_landmark.onnx")),
            ..DetectorConfig::default()
        };
        assert_eq!(build_landmarker(&config).name(), NoHands::NAME);
    }

    #[test]
    fn simulation_is_opt_in() {
        let config = DetectorConfig {
            simulate: true,
            model_path: Some(PathBuf::from("/nonexistent/hand_landmark.onnx")),
            ..DetectorConfig::default()
        };
        assert_eq!(build_landmarker(&config).name(), SimulatedHands::NAME);
    }
}
