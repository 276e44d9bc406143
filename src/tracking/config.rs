//! Tracker configuration types

use std::path::{Path, PathBuf};

use crate::tracking::diagnostics::DiagnosticCompression;
use crate::tracking::types::BallColor;

/// Back-projection intensity separating foreground from background.
pub const DEFAULT_THRESHOLD: u8 = 100;

/// Flood fill difference allowed between neighboring foreground pixels.
///
/// Deliberately the legacy tracker's value of 200 rather than the threshold:
/// foreground values span `[100, 255]`, so each 4-connected region gets a
/// single label.
pub const DEFAULT_FLOOD_TOLERANCE: u8 = 200;

pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Configuration for the ball tracker
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Directory holding the `colour_hist_<COLOR>.yml` calibration files
    pub histogram_dir: PathBuf,
    /// System camera index to open
    pub camera_index: u32,
    /// Expected frame width; frames of any other size are skipped
    pub frame_width: u32,
    /// Expected frame height; frames of any other size are skipped
    pub frame_height: u32,
    /// Flip each frame horizontally so the player sees a mirror view
    pub mirror: bool,
    /// Foreground threshold applied to back-projected intensities
    pub threshold: u8,
    /// Lower and upper flood fill tolerance used while labeling regions
    pub flood_tolerance: u8,
    /// When set, every poll dumps the mask and label map of each color here
    pub diagnostics_dir: Option<PathBuf>,
    /// Compression used for diagnostic dumps
    pub diagnostic_compression: DiagnosticCompression,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            histogram_dir: PathBuf::from("Histograms"),
            camera_index: 0,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            mirror: true,
            threshold: DEFAULT_THRESHOLD,
            flood_tolerance: DEFAULT_FLOOD_TOLERANCE,
            diagnostics_dir: None,
            diagnostic_compression: DiagnosticCompression::None,
        }
    }
}

impl TrackerConfig {
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// Path of the calibration file for `color`.
    pub fn histogram_path(&self, color: BallColor) -> PathBuf {
        self.histogram_dir.join(color.histogram_file_name())
    }

    pub fn frame_dimensions(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }
}

/// Builder for TrackerConfig
#[derive(Default)]
pub struct TrackerConfigBuilder {
    histogram_dir: Option<PathBuf>,
    camera_index: Option<u32>,
    frame_width: Option<u32>,
    frame_height: Option<u32>,
    mirror: Option<bool>,
    threshold: Option<u8>,
    flood_tolerance: Option<u8>,
    diagnostics_dir: Option<Option<PathBuf>>,
    diagnostic_compression: Option<DiagnosticCompression>,
}

impl TrackerConfigBuilder {
    pub fn histogram_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.histogram_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn camera_index(mut self, index: u32) -> Self {
        self.camera_index = Some(index);
        self
    }

    pub fn frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = Some(width);
        self.frame_height = Some(height);
        self
    }

    pub fn mirror(mut self, enable: bool) -> Self {
        self.mirror = Some(enable);
        self
    }

    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn flood_tolerance(mut self, tolerance: u8) -> Self {
        self.flood_tolerance = Some(tolerance);
        self
    }

    pub fn diagnostics_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.diagnostics_dir = Some(dir);
        self
    }

    pub fn diagnostic_compression(mut self, compression: DiagnosticCompression) -> Self {
        self.diagnostic_compression = Some(compression);
        self
    }

    pub fn build(self) -> TrackerConfig {
        let default = TrackerConfig::default();
        TrackerConfig {
            histogram_dir: self.histogram_dir.unwrap_or(default.histogram_dir),
            camera_index: self.camera_index.unwrap_or(default.camera_index),
            frame_width: self.frame_width.unwrap_or(default.frame_width),
            frame_height: self.frame_height.unwrap_or(default.frame_height),
            mirror: self.mirror.unwrap_or(default.mirror),
            threshold: self.threshold.unwrap_or(default.threshold),
            flood_tolerance: self.flood_tolerance.unwrap_or(default.flood_tolerance),
            diagnostics_dir: self.diagnostics_dir.unwrap_or(default.diagnostics_dir),
            diagnostic_compression: self
                .diagnostic_compression
                .unwrap_or(default.diagnostic_compression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TrackerConfig::builder()
            .histogram_dir("calibration")
            .camera_index(2)
            .frame_size(320, 240)
            .mirror(false)
            .threshold(80)
            .flood_tolerance(50)
            .diagnostics_dir(Some(PathBuf::from("dumps")))
            .diagnostic_compression(DiagnosticCompression::Lzw)
            .build();

        assert_eq!(config.histogram_dir, PathBuf::from("calibration"));
        assert_eq!(config.camera_index, 2);
        assert_eq!(config.frame_dimensions(), (320, 240));
        assert!(!config.mirror);
        assert_eq!(config.threshold, 80);
        assert_eq!(config.flood_tolerance, 50);
        assert_eq!(config.diagnostics_dir, Some(PathBuf::from("dumps")));
        assert!(matches!(config.diagnostic_compression, DiagnosticCompression::Lzw));
    }

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::builder().build();

        assert_eq!(config.frame_dimensions(), (640, 480));
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.flood_tolerance, DEFAULT_FLOOD_TOLERANCE);
        assert!(config.mirror);
        assert!(config.diagnostics_dir.is_none());
        assert_eq!(
            config.histogram_path(BallColor::Green),
            PathBuf::from("Histograms").join("colour_hist_GREEN.yml")
        );
    }
}
