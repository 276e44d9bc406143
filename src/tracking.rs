//! Color-region tracking module
//!
//! This module turns camera frames into tracked ball positions. Each stage of
//! the per-color pipeline lives in its own module: histogram storage, region
//! segmentation, connected-region labeling and largest-blob selection. The
//! `tracker` module ties them to a frame source.

pub mod camera;
pub mod common;
pub mod config;
pub mod diagnostics;
pub mod histogram;
pub mod label;
pub mod pipeline;
pub mod segment;
pub mod select;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod test_support;

pub use common::{Result, TrackingError};

pub use config::{TrackerConfig, TrackerConfigBuilder};

pub use types::{BallColor, BoundingBox, Point, Size, TrackedObject};

pub use histogram::{Histogram, HistogramReader, YamlHistogramStore};

pub use segment::segment;

pub use label::{LabelMap, label};

pub use select::{Blob, find_blobs, largest_blob, select};

pub use pipeline::{Track, TrackingPipeline};

pub use camera::{FileSequenceSource, FrameSource};

#[cfg(feature = "webcam")]
pub use camera::NokhwaCamera;

pub use diagnostics::{DiagnosticCompression, DiagnosticWriter, TiffDiagnosticWriter};

pub use tracker::{Tracker, TrackerState};
