use std::io::{Cursor, Write};

use image::GrayImage;
use tiff::encoder::colortype::{ColorType, Gray8, Gray32};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tracing::debug;

use crate::tracking::common::error::{Result, TrackingError};
use crate::tracking::diagnostics::types::DiagnosticCompression;
use crate::tracking::diagnostics::writer::DiagnosticWriter;
use crate::tracking::label::LabelMap;

/// Writes masks as 8-bit and label maps as 32-bit grayscale TIFFs.
pub struct TiffDiagnosticWriter;

impl DiagnosticWriter for TiffDiagnosticWriter {
    fn write_mask(&self, mask: &GrayImage, output: &mut dyn Write, compression: DiagnosticCompression) -> Result<()> {
        debug!("Encoding mask TIFF: {}x{}", mask.width(), mask.height());
        encode::<Gray8>(mask.width(), mask.height(), mask.as_raw(), output, compression)
    }

    fn write_labels(&self, labels: &LabelMap, output: &mut dyn Write, compression: DiagnosticCompression) -> Result<()> {
        debug!("Encoding label TIFF: {}x{}", labels.width, labels.height);
        encode::<Gray32>(labels.width, labels.height, &labels.data, output, compression)
    }
}

fn encode<C>(
    width: u32,
    height: u32,
    data: &[C::Inner],
    output: &mut dyn Write,
    compression: DiagnosticCompression,
) -> Result<()>
where
    C: ColorType,
    [C::Inner]: TiffValue,
{
    let mut buffer = Vec::new();

    let compression = match compression {
        DiagnosticCompression::None => Compression::Uncompressed,
        DiagnosticCompression::Lzw => Compression::Lzw,
        DiagnosticCompression::Deflate => Compression::Deflate(DeflateLevel::Fast),
    };

    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
        .map_err(|e| TrackingError::EncodeError(e.to_string()))?
        .with_compression(compression);

    encoder
        .write_image::<C>(width, height, data)
        .map_err(|e| TrackingError::EncodeError(e.to_string()))?;

    output.write_all(&buffer)?;
    Ok(())
}
