//! System camera source backed by nokhwa.

use image::RgbImage;
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use tracing::{info, warn};

use crate::tracking::camera::source::{FrameSource, ensure_resolution};
use crate::tracking::common::error::{Result, TrackingError};
use crate::tracking::config::TrackerConfig;

const REQUESTED_FPS: u32 = 30;

/// A webcam opened by index, streaming RGB frames at the requested
/// resolution. Opening fails when the device cannot deliver exactly that
/// resolution. The stream is stopped on `close` and on drop.
pub struct NokhwaCamera {
    index: u32,
    width: u32,
    height: u32,
    camera: Option<Camera>,
}

impl NokhwaCamera {
    pub fn new(index: u32, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
            camera: None,
        }
    }

    /// The camera and resolution named by `config`.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.camera_index, config.frame_width, config.frame_height)
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn requested_resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for NokhwaCamera {
    fn open(&mut self) -> Result<()> {
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(self.width, self.height),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            ),
        ));

        let mut camera = Camera::new(CameraIndex::Index(self.index), format)
            .map_err(|e| TrackingError::CameraUnavailable(e.to_string()))?;
        let negotiated = camera.resolution();
        ensure_resolution(
            self.requested_resolution(),
            (negotiated.width(), negotiated.height()),
        )?;

        camera
            .open_stream()
            .map_err(|e| TrackingError::CameraUnavailable(e.to_string()))?;

        info!(index = self.index, format = ?camera.camera_format(), "Camera opened");
        self.camera = Some(camera);
        Ok(())
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| TrackingError::FrameRead("camera stream is not open".to_string()))?;

        let buffer = camera
            .frame()
            .map_err(|e| TrackingError::FrameRead(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| TrackingError::FrameRead(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| TrackingError::FrameRead("decoded buffer has wrong size".to_string()))
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                warn!(index = self.index, "Failed to stop camera stream: {}", e);
            }
        }
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.close();
    }
}
