//! Diagnostic dump module
//!
//! This module writes intermediate pipeline buffers (foreground masks and
//! label maps) to TIFF files for offline inspection.

mod tiff_writer;
pub mod types;
mod writer;

pub use tiff_writer::TiffDiagnosticWriter;
pub use types::DiagnosticCompression;
pub use writer::DiagnosticWriter;
