use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Failed to read histogram file: {0}")]
    HistogramRead(String),

    #[error("Histogram data missing or malformed: {0}")]
    MissingData(String),

    #[error("Failed to write histogram file: {0}")]
    HistogramWrite(String),

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Failed to read frame: {0}")]
    FrameRead(String),

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Failed to encode diagnostic image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackingError>;
