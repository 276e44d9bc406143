//! Frame source module
//!
//! This module provides the frame sources the tracker can poll: an image-file
//! sequence for offline runs and, with the `webcam` feature, a system camera.

mod file_source;
#[cfg(feature = "webcam")]
mod nokhwa_camera;
mod source;

pub use file_source::FileSequenceSource;
#[cfg(feature = "webcam")]
pub use nokhwa_camera::NokhwaCamera;
pub use source::{FrameSource, ensure_resolution};
