// src/video.rs - Camera capture
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::{debug, info, warn};

use crate::error::{HudError, Result};

/// Anything the app can pull frames from. Dropping the source releases
/// the device behind it.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<RgbImage>;
}

/// A webcam delivering RGB frames. The stream opens lazily on the first
/// read and is stopped when the source is dropped.
pub struct CameraSource {
    camera: Camera,
    index: u32,
}

#[derive(Debug, Clone)]
pub struct CameraDescription {
    pub index: String,
    pub name: String,
}

impl CameraSource {
    pub fn new(index: u32) -> Result<Self> {
        debug!("Opening camera index {index}");
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let camera = Camera::new(CameraIndex::Index(index), requested).map_err(|e| HudError::CameraOpen {
            index,
            reason: e.to_string(),
        })?;

        info!("Opened camera {}: {}", index, camera.info().human_name());
        Ok(Self { camera, index })
    }

    pub fn name(&self) -> String {
        self.camera.info().human_name()
    }

    fn ensure_stream(&mut self) -> Result<()> {
        if !self.camera.is_stream_open() {
            self.camera.open_stream().map_err(|e| HudError::CameraOpen {
                index: self.index,
                reason: e.to_string(),
            })?;
            let resolution = self.camera.resolution();
            info!(
                "Camera stream open at {}x{} @ {} fps",
                resolution.width(),
                resolution.height(),
                self.camera.frame_rate()
            );
        }
        Ok(())
    }
}

impl FrameSource for CameraSource {
    fn read_frame(&mut self) -> Result<RgbImage> {
        self.ensure_stream()?;
        let frame = self
            .camera
            .frame()
            .map_err(|e| HudError::Capture(e.to_string()))?;
        frame
            .decode_image::<RgbFormat>()
            .map_err(|e| HudError::Capture(format!("cannot decode frame: {e}")))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if self.camera.is_stream_open() {
            if let Err(e) = self.camera.stop_stream() {
                warn!("Failed to stop camera stream: {e}");
            } else {
                debug!("Camera {} released", self.index);
            }
        }
    }
}

/// Mirrors the frame left to right so the view behaves like a mirror.
pub fn mirror(frame: &RgbImage) -> RgbImage {
    image::imageops::flip_horizontal(frame)
}

pub fn list_cameras() -> Result<Vec<CameraDescription>> {
    let cameras = nokhwa::query(ApiBackend::Auto).map_err(|e| HudError::Capture(e.to_string()))?;
    Ok(cameras
        .into_iter()
        .map(|info| CameraDescription {
            index: info.index().to_string(),
            name: info.human_name(),
        })
        .collect())
}
