use image::GrayImage;
use tracing::{debug, instrument};

use crate::tracking::label::types::LabelMap;

const ON: u8 = 255;
const OFF: u8 = 0;

/// Labels every connected foreground region of `mask`.
///
/// Pixels at or above `threshold` are foreground. Two bordered work masks are
/// kept: `foreground` holds what is still unlabeled, `inverse` holds
/// background plus everything already filled. Each round seeds a 4-connected
/// flood fill at the first remaining foreground pixel in row-major order,
/// paints it with the next label (starting at `threshold + 1`), then rebuilds
/// `foreground` as the complement of `inverse`. A fill spreads from a pixel
/// to a neighbor only when their mask values differ by at most `tolerance`.
///
/// Every round fills at least its seed, so the loop ends after at most one
/// round per foreground pixel.
#[instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn label(mask: &GrayImage, threshold: u8, tolerance: u8) -> LabelMap {
    let (width, height) = mask.dimensions();
    let mut labels = LabelMap::new(width, height);
    if width == 0 || height == 0 {
        return labels;
    }

    let mut work = WorkMasks::new(mask, threshold);
    let mut next_label = threshold as u32 + 1;
    let mut cursor = 0;
    let mut stack = Vec::new();

    while let Some(seed) = work.next_seed(cursor) {
        let filled = work.flood_fill(mask, &mut labels, seed, next_label, tolerance, &mut stack);
        debug!(label = next_label, pixels = filled, "Region labeled");

        next_label += 1;
        work.refresh_foreground();
        // Everything before the seed was already filled.
        cursor = seed;
    }

    labels
}

/// Foreground and inverse masks, one pixel wider than the image on every
/// side. The border is never foreground and always blocked in `inverse`.
struct WorkMasks {
    stride: usize,
    width: usize,
    foreground: Vec<u8>,
    inverse: Vec<u8>,
}

impl WorkMasks {
    fn new(mask: &GrayImage, threshold: u8) -> Self {
        let width = mask.width() as usize;
        let height = mask.height() as usize;
        let stride = width + 2;
        let padded = stride * (height + 2);

        let mut foreground = vec![OFF; padded];
        let mut inverse = vec![ON; padded];

        for (i, &value) in mask.as_raw().iter().enumerate() {
            let p = (i / width + 1) * stride + i % width + 1;
            if value >= threshold {
                foreground[p] = ON;
                inverse[p] = OFF;
            }
        }

        Self {
            stride,
            width,
            foreground,
            inverse,
        }
    }

    /// First remaining foreground position at or after `cursor`.
    fn next_seed(&self, cursor: usize) -> Option<usize> {
        self.foreground[cursor..]
            .iter()
            .position(|&v| v != OFF)
            .map(|offset| cursor + offset)
    }

    fn refresh_foreground(&mut self) {
        for (fg, &inv) in self.foreground.iter_mut().zip(&self.inverse) {
            *fg = !inv;
        }
    }

    /// Mask value under a padded position.
    fn value_at(&self, mask: &GrayImage, p: usize) -> i16 {
        let x = p % self.stride - 1;
        let y = p / self.stride - 1;
        mask.as_raw()[y * self.width + x] as i16
    }

    /// Fills the region reachable from `seed`, returns the number of pixels
    /// painted.
    fn flood_fill(
        &mut self,
        mask: &GrayImage,
        labels: &mut LabelMap,
        seed: usize,
        label: u32,
        tolerance: u8,
        stack: &mut Vec<usize>,
    ) -> usize {
        let tolerance = tolerance as i16;
        let mut filled = 0;

        stack.clear();
        self.mark(labels, seed, label);
        stack.push(seed);
        filled += 1;

        while let Some(p) = stack.pop() {
            let value = self.value_at(mask, p);
            for n in [p - 1, p + 1, p - self.stride, p + self.stride] {
                if self.inverse[n] != OFF {
                    continue;
                }
                let diff = self.value_at(mask, n) - value;
                if diff < -tolerance || diff > tolerance {
                    continue;
                }
                self.mark(labels, n, label);
                stack.push(n);
                filled += 1;
            }
        }

        filled
    }

    fn mark(&mut self, labels: &mut LabelMap, p: usize, label: u32) {
        self.inverse[p] = ON;
        let x = p % self.stride - 1;
        let y = p / self.stride - 1;
        labels.data[y * self.width + x] = label;
    }
}
