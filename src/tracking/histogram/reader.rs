use std::path::Path;

use crate::tracking::common::error::Result;
use crate::tracking::histogram::types::Histogram;

pub trait HistogramReader {
    fn load(&self, path: &Path) -> Result<Histogram>;
}
