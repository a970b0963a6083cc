// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("failed to open camera {index}: {reason}")]
    CameraOpen { index: u32, reason: String },

    #[error("camera capture failed: {0}")]
    Capture(String),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    ConfigValue { field: &'static str, reason: String },

    #[error("cannot allocate a {width}x{height} frame buffer")]
    FrameAlloc { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, HudError>;
