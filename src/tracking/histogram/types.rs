//! Hue/saturation histogram

use image::RgbImage;

use crate::tracking::common::error::{Result, TrackingError};
use crate::tracking::segment::hsv::rgb_to_hsv;

/// Number of hue bins (histogram rows).
pub const HUE_BINS: usize = 50;
/// Number of saturation bins (histogram columns).
pub const SATURATION_BINS: usize = 50;

/// Upper bound (exclusive) of the value range covered by each channel.
const CHANNEL_RANGE_MAX: f32 = 255.0;

/// A 2D hue x saturation histogram of non-negative bin counts.
///
/// Bins are stored row-major with hue as the row index. Each channel covers
/// the half-open range `[0, 255)`, so a channel value of 255 falls outside
/// every bin. A histogram is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<f32>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Histogram {
    /// The all-zero histogram. Tracking is disabled for a color whose
    /// histogram is all zeros.
    pub fn zeros() -> Self {
        Self {
            bins: vec![0.0; HUE_BINS * SATURATION_BINS],
        }
    }

    /// Builds a histogram from row-major bin values.
    pub fn from_bins(bins: Vec<f32>) -> Result<Self> {
        if bins.len() != HUE_BINS * SATURATION_BINS {
            return Err(TrackingError::MissingData(format!(
                "expected {} bins, found {}",
                HUE_BINS * SATURATION_BINS,
                bins.len()
            )));
        }

        if let Some(bad) = bins.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(TrackingError::MissingData(format!(
                "bin values must be finite and non-negative, found {}",
                bad
            )));
        }

        Ok(Self { bins })
    }

    /// Accumulates the hue/saturation counts of every pixel of every sample.
    ///
    /// Per-sample histograms are summed without normalization, matching how
    /// calibration files are produced.
    pub fn from_samples(samples: &[RgbImage]) -> Self {
        let mut bins = vec![0.0f32; HUE_BINS * SATURATION_BINS];

        for sample in samples {
            for pixel in sample.pixels() {
                let [h, s, _] = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
                if let (Some(hb), Some(sb)) =
                    (bin_index(h, HUE_BINS), bin_index(s, SATURATION_BINS))
                {
                    bins[hb * SATURATION_BINS + sb] += 1.0;
                }
            }
        }

        Self { bins }
    }

    /// Value of the bin at `(hue_bin, saturation_bin)`, `None` when either
    /// index is out of range.
    pub fn get(&self, hue_bin: usize, saturation_bin: usize) -> Option<f32> {
        if hue_bin >= HUE_BINS || saturation_bin >= SATURATION_BINS {
            return None;
        }
        self.bins.get(hue_bin * SATURATION_BINS + saturation_bin).copied()
    }

    /// Bin value for a pixel's hue and saturation, 0 when either channel lies
    /// outside the histogram range.
    pub fn lookup(&self, hue: u8, saturation: u8) -> f32 {
        match (bin_index(hue, HUE_BINS), bin_index(saturation, SATURATION_BINS)) {
            (Some(hb), Some(sb)) => self.get(hb, sb).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.iter().all(|&v| v == 0.0)
    }

    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    pub fn total(&self) -> f64 {
        self.bins.iter().map(|&v| v as f64).sum()
    }
}

/// Uniform bin lookup over `[0, 255)`.
pub(crate) fn bin_index(value: u8, bins: usize) -> Option<usize> {
    let index = (value as f32 * bins as f32 / CHANNEL_RANGE_MAX).floor() as usize;
    (index < bins).then_some(index)
}
