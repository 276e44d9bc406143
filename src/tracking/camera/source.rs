use image::RgbImage;

use crate::tracking::common::error::{Result, TrackingError};

/// A device or stream that yields RGB frames on demand.
pub trait FrameSource {
    /// Acquires the underlying device. Fails with `CameraUnavailable`.
    fn open(&mut self) -> Result<()>;

    /// Reads the next frame. Fails with `FrameRead`.
    fn read_frame(&mut self) -> Result<RgbImage>;

    /// Releases the underlying device.
    fn close(&mut self) {}
}

/// Fails with `CameraUnavailable` when a device settled on a resolution other
/// than the one requested.
pub fn ensure_resolution(requested: (u32, u32), negotiated: (u32, u32)) -> Result<()> {
    if requested == negotiated {
        return Ok(());
    }
    Err(TrackingError::CameraUnavailable(format!(
        "requested {}x{}, device offers {}x{}",
        requested.0, requested.1, negotiated.0, negotiated.1
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_resolution_is_accepted() {
        assert!(ensure_resolution((640, 480), (640, 480)).is_ok());
    }

    #[test]
    fn test_other_resolution_is_rejected() {
        let err = ensure_resolution((640, 480), (1280, 720)).unwrap_err();
        assert!(matches!(err, TrackingError::CameraUnavailable(_)));
        assert!(err.to_string().contains("1280x720"));
    }
}
