// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{HudError, Result};
use crate::gesture::GestureThresholds;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub camera: CameraConfig,
    pub detector: DetectorConfig,
    pub gestures: GestureThresholds,
    pub palette: Palette,
    /// TrueType font for HUD text. Common system fonts are tried when unset.
    pub font_path: Option<PathBuf>,
    /// Draw the landmark skeleton under the HUD.
    pub show_skeleton: bool,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    Nhwc,
    Nchw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub max_hands: usize,
    pub detection_confidence: f32,
    pub tracking_confidence: f32,
    /// Hand landmark ONNX model. Without one no hands are found, unless
    /// `simulate` is set.
    pub model_path: Option<PathBuf>,
    pub input_size: u32,
    pub layout: TensorLayout,
    pub channel_order: ChannelOrder,
    /// Side of the tracking crop relative to the hand's bounding box.
    pub roi_scale: f32,
    /// Draw a synthetic hand instead of running a model.
    pub simulate: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            detection_confidence: 0.7,
            tracking_confidence: 0.7,
            model_path: None,
            input_size: 224,
            layout: TensorLayout::Nhwc,
            channel_order: ChannelOrder::Rgb,
            roi_scale: 2.0,
            simulate: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// HUD colours, in RGB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub cyan: Color,
    pub orange: Color,
    pub white: Color,
    /// Skeleton joints.
    pub red: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cyan: Color::rgb(0, 255, 255),
            orange: Color::rgb(255, 180, 0),
            white: Color::rgb(255, 255, 255),
            red: Color::rgb(255, 0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hand Tracking AR UI".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl HudConfig {
    /// Loads `path` if given, else the per-user config file if one exists,
    /// else the built-in defaults. Nothing is written back.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let config = match path {
            Some(path) => {
                let config = Self::from_file(&path)?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => {
                debug!("No configuration file, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "handhud", "Hand HUD")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| HudError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| HudError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn validate(&self) -> Result<()> {
        let detector = &self.detector;
        if detector.max_hands == 0 {
            return Err(HudError::ConfigValue {
                field: "detector.max_hands",
                reason: "must track at least one hand".to_string(),
            });
        }
        for (field, value) in [
            ("detector.detection_confidence", detector.detection_confidence),
            ("detector.tracking_confidence", detector.tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HudError::ConfigValue {
                    field,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        if detector.input_size == 0 {
            return Err(HudError::ConfigValue {
                field: "detector.input_size",
                reason: "must be positive".to_string(),
            });
        }
        if !(detector.roi_scale >= 1.0) {
            return Err(HudError::ConfigValue {
                field: "detector.roi_scale",
                reason: format!("{} is below 1.0", detector.roi_scale),
            });
        }
        if !(self.gestures.open_spread >= 0.0) {
            return Err(HudError::ConfigValue {
                field: "gestures.open_spread",
                reason: "must be a non-negative distance".to_string(),
            });
        }
        Ok(())
    }
}
