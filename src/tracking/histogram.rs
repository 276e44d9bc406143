//! Color histogram module
//!
//! This module holds the hue/saturation histogram used for back-projection and
//! the calibration-file storage it is loaded from.

mod reader;
mod yaml_store;
pub mod types;

pub use reader::HistogramReader;
pub use types::{HUE_BINS, Histogram, SATURATION_BINS};
pub use yaml_store::YamlHistogramStore;
