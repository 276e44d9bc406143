//! Calibration-file storage for histograms.
//!
//! Calibration files are YAML documents with a single `histogram` key mapping
//! to a 50x50 matrix of 32-bit floats. Files written by OpenCV's FileStorage
//! start with a `%YAML:1.0` line and tag the matrix `!!opencv-matrix`; both
//! are accepted on load and the header is reproduced on save.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::tracking::common::error::{Result, TrackingError};
use crate::tracking::histogram::reader::HistogramReader;
use crate::tracking::histogram::types::{HUE_BINS, Histogram, SATURATION_BINS};

/// Key under which the histogram matrix is stored.
const HISTOGRAM_KEY: &str = "histogram";

/// Header line written by OpenCV; not valid YAML directive syntax.
const OPENCV_YAML_HEADER: &str = "%YAML:1.0";

/// Element type code for 32-bit floats.
const FLOAT_ELEMENT_TYPE: &str = "f";

#[derive(Debug, Serialize, Deserialize)]
struct MatrixNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cols: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sizes: Option<Vec<usize>>,
    dt: String,
    data: Vec<f32>,
}

impl MatrixNode {
    fn shape(&self) -> Option<(usize, usize)> {
        match (&self.sizes, self.rows, self.cols) {
            (Some(sizes), _, _) if sizes.len() == 2 => Some((sizes[0], sizes[1])),
            (None, Some(rows), Some(cols)) => Some((rows, cols)),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct HistogramDocument<'a> {
    histogram: &'a MatrixNode,
}

/// Loads and saves histograms in the calibration YAML format.
pub struct YamlHistogramStore;

impl YamlHistogramStore {
    /// Parses a calibration document.
    pub fn parse(text: &str) -> Result<Histogram> {
        let body = strip_opencv_header(text);

        let document: Value = serde_yaml::from_str(body)
            .map_err(|e| TrackingError::MissingData(format!("invalid YAML: {}", e)))?;

        let node = document
            .get(HISTOGRAM_KEY)
            .cloned()
            .ok_or_else(|| TrackingError::MissingData(format!("no '{}' key", HISTOGRAM_KEY)))?;

        let matrix: MatrixNode = serde_yaml::from_value(untagged(node))
            .map_err(|e| TrackingError::MissingData(format!("malformed matrix: {}", e)))?;

        if matrix.dt != FLOAT_ELEMENT_TYPE {
            return Err(TrackingError::MissingData(format!(
                "expected element type '{}', found '{}'",
                FLOAT_ELEMENT_TYPE, matrix.dt
            )));
        }

        match matrix.shape() {
            Some((HUE_BINS, SATURATION_BINS)) => {}
            Some((rows, cols)) => {
                return Err(TrackingError::MissingData(format!(
                    "expected {}x{} matrix, found {}x{}",
                    HUE_BINS, SATURATION_BINS, rows, cols
                )));
            }
            None => {
                return Err(TrackingError::MissingData(
                    "matrix has no shape".to_string(),
                ));
            }
        }

        Histogram::from_bins(matrix.data)
    }

    /// Renders a calibration document for `histogram`.
    pub fn render(histogram: &Histogram) -> Result<String> {
        let matrix = MatrixNode {
            rows: Some(HUE_BINS),
            cols: Some(SATURATION_BINS),
            sizes: None,
            dt: FLOAT_ELEMENT_TYPE.to_string(),
            data: histogram.bins().to_vec(),
        };

        let body = serde_yaml::to_string(&HistogramDocument { histogram: &matrix })
            .map_err(|e| TrackingError::HistogramWrite(e.to_string()))?;

        Ok(format!("{}\n---\n{}", OPENCV_YAML_HEADER, body))
    }

    /// Writes `histogram` to `path`, replacing any existing file.
    pub fn save(&self, path: &Path, histogram: &Histogram) -> Result<()> {
        let text = Self::render(histogram)?;
        std::fs::write(path, text).map_err(|e| {
            TrackingError::HistogramWrite(format!("{}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Histogram saved");
        Ok(())
    }
}

impl HistogramReader for YamlHistogramStore {
    fn load(&self, path: &Path) -> Result<Histogram> {
        debug!(path = %path.display(), "Loading histogram");

        let text = std::fs::read_to_string(path).map_err(|e| {
            TrackingError::HistogramRead(format!("{}: {}", path.display(), e))
        })?;

        Self::parse(&text)
    }
}

fn strip_opencv_header(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.strip_prefix(OPENCV_YAML_HEADER) {
        Some(rest) => rest,
        None => text,
    }
}

fn untagged(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => tagged.value,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opencv_document(rows: usize, cols: usize, fill: &str) -> String {
        let data = vec![fill; rows * cols].join(", ");
        format!(
            "%YAML:1.0\n---\nhistogram: !!opencv-matrix\n   rows: {}\n   cols: {}\n   dt: f\n   data: [ {} ]\n",
            rows, cols, data
        )
    }

    #[test]
    fn test_parse_opencv_document() {
        let mut text = opencv_document(50, 50, "0.");
        text = text.replacen("0.,", "1.25e+02,", 1);

        let hist = YamlHistogramStore::parse(&text).unwrap();

        assert_eq!(hist.get(0, 0), Some(125.0));
        assert_eq!(hist.get(0, 1), Some(0.0));
        assert_eq!(hist.total(), 125.0);
    }

    #[test]
    fn test_parse_nd_matrix_sizes() {
        let data = vec!["2"; 2500].join(", ");
        let text = format!("histogram:\n  sizes: [50, 50]\n  dt: f\n  data: [{}]\n", data);

        let hist = YamlHistogramStore::parse(&text).unwrap();
        assert_eq!(hist.get(49, 49), Some(2.0));
    }

    #[test]
    fn test_missing_key() {
        let result = YamlHistogramStore::parse("other: 1\n");
        assert!(matches!(result, Err(TrackingError::MissingData(_))));
    }

    #[test]
    fn test_wrong_shape() {
        let text = opencv_document(10, 10, "1.");
        let result = YamlHistogramStore::parse(&text);
        assert!(matches!(result, Err(TrackingError::MissingData(_))));
    }

    #[test]
    fn test_wrong_element_type() {
        let text = opencv_document(50, 50, "1").replace("dt: f", "dt: u");
        let result = YamlHistogramStore::parse(&text);
        assert!(matches!(result, Err(TrackingError::MissingData(_))));
    }

    #[test]
    fn test_data_length_mismatch() {
        let text = opencv_document(50, 50, "1").replacen("1, ", "", 1);
        let result = YamlHistogramStore::parse(&text);
        assert!(matches!(result, Err(TrackingError::MissingData(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = YamlHistogramStore.load(&dir.path().join("colour_hist_GREEN.yml"));
        assert!(matches!(result, Err(TrackingError::HistogramRead(_))));
    }

    #[test]
    fn test_save_then_load() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("colour_hist_RED.yml");

        let mut bins = vec![0.0f32; HUE_BINS * SATURATION_BINS];
        bins[42] = 1600.0;
        bins[HUE_BINS * SATURATION_BINS - 1] = 0.5;
        let hist = Histogram::from_bins(bins)?;

        YamlHistogramStore.save(&path, &hist)?;
        let text = std::fs::read_to_string(&path)?;
        assert!(text.starts_with("%YAML:1.0\n"));

        let loaded = YamlHistogramStore.load(&path)?;
        assert_eq!(loaded, hist);
        Ok(())
    }

    #[test]
    fn test_save_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("colour_hist_RED.yml");
        let result = YamlHistogramStore.save(&path, &Histogram::zeros());
        assert!(matches!(result, Err(TrackingError::HistogramWrite(_))));
    }
}
