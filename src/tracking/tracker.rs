//! Two-color tracker facade over a frame source.


use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use image::imageops::flip_horizontal_in_place;
use tracing::{debug, info, info_span, instrument, warn};

use crate::tracking::{
    camera::FrameSource,
    common::error::{Result, TrackingError},
    config::TrackerConfig,
    diagnostics::{DiagnosticWriter, TiffDiagnosticWriter},
    histogram::{Histogram, HistogramReader, YamlHistogramStore},
    pipeline::{Track, TrackingPipeline},
    types::{BallColor, Point, TrackedObject},
};

/// Lifecycle of a [`Tracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Histograms are loaded, the frame source is not open yet.
    Ready,
    /// The frame source is open and `update_camera` processes frames.
    Polling,
    /// The frame source has been released. Terminal.
    Closed,
}

pub struct Tracker<S: FrameSource, W: DiagnosticWriter = TiffDiagnosticWriter> {
    config: TrackerConfig,
    source: S,
    writer: W,
    pipeline: TrackingPipeline,
    histograms: [Histogram; 2],
    tracked: [TrackedObject; 2],
    last_frame: Option<RgbImage>,
    state: TrackerState,
}

impl<S: FrameSource> Tracker<S, TiffDiagnosticWriter> {
    /// Loads both calibration files from `config.histogram_dir`.
    pub fn new(config: TrackerConfig, source: S) -> Self {
        Self::with_custom(config, source, &YamlHistogramStore, TiffDiagnosticWriter)
    }
}

impl<S: FrameSource, W: DiagnosticWriter> Tracker<S, W> {
    pub fn with_custom<R: HistogramReader>(
        config: TrackerConfig,
        source: S,
        reader: &R,
        writer: W,
    ) -> Self {
        let histograms = BallColor::ALL.map(|color| load_histogram(reader, &config, color));
        let pipeline = TrackingPipeline::from_config(&config);

        Self {
            config,
            source,
            writer,
            pipeline,
            histograms,
            tracked: [TrackedObject::default(); 2],
            last_frame: None,
            state: TrackerState::Ready,
        }
    }

    /// Opens the frame source and moves to [`TrackerState::Polling`].
    ///
    /// The source is used as given; build a webcam source with
    /// `NokhwaCamera::from_config` so it opens the configured camera.
    ///
    /// Calling it while already polling is a no-op.
    pub fn init_camera(&mut self) -> Result<()> {
        match self.state {
            TrackerState::Polling => return Ok(()),
            TrackerState::Closed => {
                return Err(TrackingError::CameraUnavailable(
                    "tracker is closed".to_string(),
                ));
            }
            TrackerState::Ready => {}
        }

        self.source.open()?;
        self.state = TrackerState::Polling;
        info!(
            width = self.config.frame_width,
            height = self.config.frame_height,
            "Frame source opened"
        );
        Ok(())
    }

    /// Grabs one frame and refreshes the tracked object of every enabled
    /// color. Failures keep the previous values.
    #[instrument(skip(self))]
    pub fn update_camera(&mut self) {
        if self.state != TrackerState::Polling {
            debug!(state = ?self.state, "Not polling, ignoring update");
            return;
        }

        let mut frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                debug!("Skipping poll: {}", e);
                return;
            }
        };

        let expected = self.config.frame_dimensions();
        if frame.dimensions() != expected {
            let (width, height) = frame.dimensions();
            debug!(
                "Skipping poll: {}",
                TrackingError::InvalidDimensions(width, height)
            );
            return;
        }

        if self.config.mirror {
            flip_horizontal_in_place(&mut frame);
        }

        for color in BallColor::ALL {
            let histogram = &self.histograms[color.index()];
            if histogram.is_empty() {
                continue;
            }

            let _span = info_span!("track", %color).entered();
            let track = self.pipeline.track(&frame, histogram);
            let tracked = TrackedObject::from_bounding_box(&track.bbox);
            debug!(
                x = tracked.centroid.x,
                y = tracked.centroid.y,
                area = tracked.area(),
                "Tracked"
            );
            self.tracked[color.index()] = tracked;

            if let Some(dir) = &self.config.diagnostics_dir {
                if let Err(e) = self.write_diagnostics(dir, color, &track) {
                    warn!("Failed to write {} diagnostics: {}", color, e);
                }
            }
        }

        self.last_frame = Some(frame);
    }

    fn write_diagnostics(&self, dir: &Path, color: BallColor, track: &Track) -> Result<()> {
        let name = color.label().to_lowercase();
        let compression = self.config.diagnostic_compression;

        let mut mask_file = BufWriter::new(File::create(dir.join(format!("{}_mask.tiff", name)))?);
        self.writer.write_mask(&track.mask, &mut mask_file, compression)?;
        mask_file.flush()?;

        let mut labels_file =
            BufWriter::new(File::create(dir.join(format!("{}_labels.tiff", name)))?);
        self.writer.write_labels(&track.labels, &mut labels_file, compression)?;
        labels_file.flush()?;

        Ok(())
    }

    pub fn tracked(&self, color: BallColor) -> TrackedObject {
        self.tracked[color.index()]
    }

    pub fn position(&self, color: BallColor) -> Point {
        self.tracked(color).centroid
    }

    /// Bounding box area of the tracked ball.
    pub fn size(&self, color: BallColor) -> u32 {
        self.tracked(color).area()
    }

    /// e.g. `Green Ball: x=320 y=240 size: 1600`
    pub fn status_string(&self, color: BallColor) -> String {
        let position = self.position(color);
        format!(
            "{} Ball: x={} y={} size: {}",
            color,
            position.x,
            position.y,
            self.size(color)
        )
    }

    /// Whether a usable calibration was loaded for `color`.
    pub fn is_enabled(&self, color: BallColor) -> bool {
        !self.histograms[color.index()].is_empty()
    }

    pub fn histogram(&self, color: BallColor) -> &Histogram {
        &self.histograms[color.index()]
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// The last frame processed, after mirroring.
    pub fn last_frame(&self) -> Option<&RgbImage> {
        self.last_frame.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Releases the frame source. Safe to call more than once.
    pub fn close(&mut self) {
        if self.state == TrackerState::Closed {
            return;
        }
        if self.state == TrackerState::Polling {
            self.source.close();
            info!("Camera released");
        }
        self.state = TrackerState::Closed;
    }
}

impl<S: FrameSource, W: DiagnosticWriter> Drop for Tracker<S, W> {
    fn drop(&mut self) {
        self.close();
    }
}

fn load_histogram<R: HistogramReader>(
    reader: &R,
    config: &TrackerConfig,
    color: BallColor,
) -> Histogram {
    let path = config.histogram_path(color);
    match reader.load(&path) {
        Ok(histogram) => {
            info!("Loaded {} histogram from {}", color, path.display());
            histogram
        }
        Err(e) => {
            warn!("{} tracking disabled: {}", color, e);
            Histogram::zeros()
        }
    }
}
