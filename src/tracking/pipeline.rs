use image::{GrayImage, RgbImage};
use tracing::{debug, instrument};

use crate::tracking::{
    config::{DEFAULT_FLOOD_TOLERANCE, DEFAULT_THRESHOLD, TrackerConfig},
    histogram::Histogram,
    label::{LabelMap, label},
    segment::segment,
    select::select,
    types::BoundingBox,
};

/// Everything one pass of the pipeline produced for a single color.
#[derive(Debug, Clone)]
pub struct Track {
    pub mask: GrayImage,
    pub labels: LabelMap,
    pub bbox: BoundingBox,
}

/// Segment, label and select, run in sequence on one frame for one color.
#[derive(Debug, Clone, Copy)]
pub struct TrackingPipeline {
    threshold: u8,
    flood_tolerance: u8,
}

impl Default for TrackingPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_FLOOD_TOLERANCE)
    }
}

impl TrackingPipeline {
    pub fn new(threshold: u8, flood_tolerance: u8) -> Self {
        Self {
            threshold,
            flood_tolerance,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.threshold, config.flood_tolerance)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn flood_tolerance(&self) -> u8 {
        self.flood_tolerance
    }

    pub fn segment(&self, frame: &RgbImage, histogram: &Histogram) -> GrayImage {
        segment(frame, histogram, self.threshold)
    }

    pub fn label(&self, mask: &GrayImage) -> LabelMap {
        label(mask, self.threshold, self.flood_tolerance)
    }

    pub fn select(&self, labels: &LabelMap) -> BoundingBox {
        select(labels, self.threshold)
    }

    #[instrument(skip(self, frame, histogram), fields(width = frame.width(), height = frame.height()))]
    pub fn track(&self, frame: &RgbImage, histogram: &Histogram) -> Track {
        let (width, height) = frame.dimensions();
        if histogram.is_empty() {
            debug!("Histogram is empty, skipping");
            return Track {
                mask: GrayImage::new(width, height),
                labels: LabelMap::new(width, height),
                bbox: BoundingBox::default(),
            };
        }

        let mask = {
            let _span = tracing::debug_span!("segment").entered();
            self.segment(frame, histogram)
        };

        let labels = {
            let _span = tracing::debug_span!("label").entered();
            self.label(&mask)
        };

        let bbox = {
            let _span = tracing::debug_span!("select").entered();
            self.select(&labels)
        };

        debug!(
            x = bbox.x,
            y = bbox.y,
            width = bbox.width,
            height = bbox.height,
            "Tracking pass complete"
        );

        Track { mask, labels, bbox }
    }
}
