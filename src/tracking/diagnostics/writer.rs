use std::io::Write;

use image::GrayImage;

use crate::tracking::common::error::Result;
use crate::tracking::diagnostics::types::DiagnosticCompression;
use crate::tracking::label::LabelMap;

pub trait DiagnosticWriter {
    fn write_mask(&self, mask: &GrayImage, output: &mut dyn Write, compression: DiagnosticCompression) -> Result<()>;
    fn write_labels(&self, labels: &LabelMap, output: &mut dyn Write, compression: DiagnosticCompression) -> Result<()>;
}
