//! Diagnostic dump configuration types

/// TIFF compression methods for diagnostic dumps
#[derive(Debug, Clone, Copy, Default)]
pub enum DiagnosticCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, fast level
    Deflate,
}
