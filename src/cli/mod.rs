//! CLI module for framecut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ports::LogFormat;

pub mod args;
pub mod commands;

pub use args::{CropArgs, InspectArgs, PreviewArgs, TrimArgs};

/// framecut - crop and trim videos with ffmpeg
///
/// Crops a region out of a video (re-encoding it) or cuts a time range out of
/// a video without re-encoding.
#[derive(Parser, Debug)]
#[command(name = "framecut")]
#[command(about = "Crop a region of a video or trim it losslessly")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./framecut.toml, then the user config directory)
    #[arg(long, global = true, value_name = "FILE", env = "FRAMECUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level or filter directives
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// ffmpeg executable
    #[arg(long, global = true, value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long, global = true, value_name = "PATH")]
    pub ffprobe: Option<String>,

    /// Encoder threads
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Treat out-of-range minute/second fields as zero instead of rejecting them
    #[arg(long, global = true)]
    pub lenient_timestamps: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crop a region out of a video
    Crop(CropArgs),
    /// Cut a time range out of a video without re-encoding
    Trim(TrimArgs),
    /// Extract one frame, optionally cropped, to an image
    Preview(PreviewArgs),
    /// Inspect video file information
    Inspect(InspectArgs),
}
