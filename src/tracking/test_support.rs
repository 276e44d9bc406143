//! Synthetic frames and histograms shared by unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::tracking::histogram::Histogram;

pub const BACKGROUND: [u8; 3] = [128, 128, 128];
pub const RED: [u8; 3] = [200, 30, 30];
pub const GREEN: [u8; 3] = [30, 200, 30];

/// A neutral gray frame with one `side` x `side` square of `color` whose
/// top-left corner sits at `(x, y)`.
pub fn frame_with_square(width: u32, height: u32, x: u32, y: u32, side: u32, color: [u8; 3]) -> RgbImage {
    let mut frame = RgbImage::from_pixel(width, height, Rgb(BACKGROUND));
    paint_square(&mut frame, x, y, side, color);
    frame
}

pub fn paint_square(frame: &mut RgbImage, x: u32, y: u32, side: u32, color: [u8; 3]) {
    for py in y..y + side {
        for px in x..x + side {
            frame.put_pixel(px, py, Rgb(color));
        }
    }
}

pub fn histogram_for(color: [u8; 3]) -> Histogram {
    Histogram::from_samples(&[RgbImage::from_pixel(40, 40, Rgb(color))])
}

pub fn red_histogram() -> Histogram {
    histogram_for(RED)
}

pub fn green_histogram() -> Histogram {
    histogram_for(GREEN)
}

/// A mask with `value` painted over each `(x, y, width, height)` rectangle.
pub fn mask_with_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)], value: u8) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for &(x, y, w, h) in rects {
        for py in y..y + h {
            for px in x..x + w {
                mask.put_pixel(px, py, Luma([value]));
            }
        }
    }
    mask
}
