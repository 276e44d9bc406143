//! Region segmentation module
//!
//! Converts a frame into a foreground mask for one calibrated color by
//! back-projecting its histogram, suppressing noise and thresholding.

pub mod hsv;
mod segmenter;

pub use segmenter::{back_project, segment, threshold_to_zero};
