use image::{GrayImage, Luma, RgbImage};
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};
use tracing::debug;

use crate::tracking::histogram::Histogram;
use crate::tracking::segment::hsv::convert_rgb_to_hsv;

/// Produces the foreground mask of `frame` for the color described by
/// `histogram`.
///
/// The mask holds the back-projected intensity of every pixel that survives
/// one 3x3 erosion, one 3x3 dilation and threshold-to-zero at `threshold`;
/// every other pixel is 0. An all-zero histogram yields an all-zero mask.
pub fn segment(frame: &RgbImage, histogram: &Histogram, threshold: u8) -> GrayImage {
    let (width, height) = frame.dimensions();
    if histogram.is_empty() {
        debug!("Empty histogram, returning blank mask");
        return GrayImage::new(width, height);
    }

    let projected = back_project(frame, histogram);
    // Two separate passes, not a single opening.
    let element = Mask::square(1);
    let eroded = grayscale_erode(&projected, &element);
    let cleaned = grayscale_dilate(&eroded, &element);

    threshold_to_zero(cleaned, threshold)
}

/// Replaces every pixel with its histogram bin value, saturated to `u8`.
pub fn back_project(frame: &RgbImage, histogram: &Histogram) -> GrayImage {
    let hsv = convert_rgb_to_hsv(frame);
    let mut projected = GrayImage::new(frame.width(), frame.height());

    for (src, dst) in hsv.pixels().zip(projected.pixels_mut()) {
        let value = histogram.lookup(src[0], src[1]);
        *dst = Luma([value.round().clamp(0.0, 255.0) as u8]);
    }

    projected
}

/// Zeroes every pixel below `threshold`; the rest keep their value.
pub fn threshold_to_zero(mut mask: GrayImage, threshold: u8) -> GrayImage {
    for pixel in mask.pixels_mut() {
        if pixel[0] < threshold {
            pixel[0] = 0;
        }
    }
    mask
}
