// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Timestamp text could not be parsed
    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    /// Crop geometry text could not be parsed
    #[error("Invalid crop region '{0}'. Expected WxH, WxH+X+Y or W:H:X:Y")]
    InvalidCrop(String),

    /// Frame size text could not be parsed
    #[error("Invalid size '{0}'. Expected WxH")]
    InvalidSize(String),

    /// Trim range with end before start
    #[error("End time ({end}) is before start time ({start})")]
    EndBeforeStart { start: String, end: String },

    /// Trim range of zero length
    #[error("Start and end time are both {0}; nothing to trim")]
    EmptyRange(String),

    /// Trim start lies at or past the end of the media
    #[error("Start time {start} is not before the end of the video ({duration})")]
    StartBeyondEnd { start: String, duration: String },

    /// Crop rectangle does not overlap the frame at all
    #[error("Crop region {region} lies outside the {frame} frame")]
    CropOutsideFrame { region: String, frame: String },

    /// Crop rectangle collapsed after alignment
    #[error("Crop region {0} is too small to encode")]
    CropTooSmall(String),

    /// Input carries no video stream to crop or preview
    #[error("No video stream found in {0}")]
    NoVideoStream(String),

    /// Input file missing
    #[error("Input file not found: {0}")]
    FileNotFound(String),

    /// Output exists and the overwrite policy forbids replacing it
    #[error("Output file already exists: {0} (pass --overwrite to replace it)")]
    OutputExists(String),

    /// Output would replace the input it is read from
    #[error("Output path is the input file: {0}")]
    OutputIsInput(String),

    /// ffprobe failed or produced unusable output
    #[error("Failed to probe media file: {0}")]
    ProbeFailed(String),

    /// ffmpeg exited unsuccessfully
    #[error("ffmpeg exited with {code}: {stderr_tail}")]
    EngineFailed { code: String, stderr_tail: String },

    /// Media engine executable could not be launched
    #[error("Could not run '{binary}': {reason}")]
    EngineNotFound { binary: String, reason: String },

    /// Media info could not be rendered in the requested format
    #[error("Failed to format media info: {0}")]
    Format(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    pub(crate) fn timestamp(input: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidTimestamp {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
