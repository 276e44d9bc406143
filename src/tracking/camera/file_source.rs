//! Frame source that replays image files in order.

use std::path::PathBuf;

use image::RgbImage;
use tracing::debug;

use crate::tracking::camera::source::FrameSource;
use crate::tracking::common::error::{Result, TrackingError};

/// Replays a fixed list of image files, optionally starting over at the end.
///
/// Any format the `image` crate can decode is accepted; frames are converted
/// to 8-bit RGB.
pub struct FileSequenceSource {
    paths: Vec<PathBuf>,
    looping: bool,
    next: usize,
    opened: bool,
}

impl FileSequenceSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            looping: false,
            next: 0,
            opened: false,
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for FileSequenceSource {
    fn open(&mut self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(TrackingError::CameraUnavailable(
                "frame sequence is empty".to_string(),
            ));
        }

        if let Some(missing) = self.paths.iter().find(|p| !p.is_file()) {
            return Err(TrackingError::CameraUnavailable(format!(
                "{}: no such file",
                missing.display()
            )));
        }

        self.next = 0;
        self.opened = true;
        debug!(frames = self.paths.len(), "Frame sequence opened");
        Ok(())
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        if !self.opened {
            return Err(TrackingError::FrameRead("sequence is not open".to_string()));
        }

        if self.next >= self.paths.len() {
            if !self.looping {
                return Err(TrackingError::FrameRead("end of sequence".to_string()));
            }
            self.next = 0;
        }

        let path = &self.paths[self.next];
        self.next += 1;

        let frame = image::open(path)
            .map_err(|e| TrackingError::FrameRead(format!("{}: {}", path.display(), e)))?
            .to_rgb8();

        Ok(frame)
    }

    fn close(&mut self) {
        self.opened = false;
    }
}
