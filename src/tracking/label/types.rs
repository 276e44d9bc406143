//! Label map type

use image::{GrayImage, Luma};

/// Per-pixel region labels, same dimensions as the source frame.
///
/// 0 marks background; every other value identifies one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    /// Width of the map in pixels
    pub width: u32,
    /// Height of the map in pixels
    pub height: u32,
    /// Row-major labels
    pub data: Vec<u32>,
}

impl LabelMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Every non-zero label, in increasing order.
    pub fn labels(&self) -> Vec<u32> {
        let mut labels: Vec<u32> = self.data.iter().copied().filter(|&l| l != 0).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Number of pixels carrying `label`.
    pub fn count(&self, label: u32) -> usize {
        self.data.iter().filter(|&&l| l == label).count()
    }

    /// Number of pixels carrying any non-zero label.
    pub fn labeled_pixels(&self) -> usize {
        self.data.iter().filter(|&&l| l != 0).count()
    }

    /// Strict binary image: 255 where a label is present and at least
    /// `threshold`.
    pub fn to_binary(&self, threshold: u8) -> GrayImage {
        let threshold = threshold as u32;
        let mut binary = GrayImage::new(self.width, self.height);
        for (dst, &label) in binary.pixels_mut().zip(&self.data) {
            let on = label != 0 && label >= threshold;
            *dst = Luma([if on { 255 } else { 0 }]);
        }
        binary
    }
}
