//! RGB to HSV conversion using 8-bit conventions: hue is stored as half
//! degrees in `[0, 180)`, saturation and value span `[0, 255]`.

use image::{Rgb, RgbImage};

/// Converts one RGB triple to `[hue, saturation, value]`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let value = max;
    let saturation = if max == 0 {
        0
    } else {
        (delta * 255.0 / max as f32).round() as u8
    };

    if delta == 0.0 {
        return [0, saturation, value];
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut degrees = if max as f32 == r {
        60.0 * (g - b) / delta
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if degrees < 0.0 {
        degrees += 360.0;
    }

    // 359.x degrees rounds up to 180 half-degrees, which is hue 0 again.
    let hue = ((degrees / 2.0).round() as u16 % 180) as u8;

    [hue, saturation, value]
}

/// Converts a whole frame, pixel by pixel, into an HSV image.
pub fn convert_rgb_to_hsv(frame: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(frame.width(), frame.height());
    for (src, dst) in frame.pixels().zip(hsv.pixels_mut()) {
        *dst = Rgb(rgb_to_hsv(src[0], src[1], src[2]));
    }
    hsv
}
