//! framecut library
//!
//! Crops a rectangular region out of a video and trims videos between two
//! timestamps without re-encoding. All media work is delegated to the
//! `ffmpeg` and `ffprobe` executables.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    ClockTime, CropRegion, FrameSize, MediaInfo, PlaybackPosition, TrimRange,
};
