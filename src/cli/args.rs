//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::app::InspectFormat;
use crate::domain::model::{CropRegion, FrameSize};

fn parse_crf(s: &str) -> Result<u8, String> {
    clap_num::number_range(s, 0, 51)
}

/// Arguments for the crop command
#[derive(Args, Debug)]
pub struct CropArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (default: <input>_crop_<W>x<H>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Crop region: WxH, WxH+X+Y or W:H:X:Y (default: 540x720 at the top left)
    #[arg(short, long)]
    pub region: Option<CropRegion>,

    /// Size the region was selected on, WxH; the region is scaled to the source
    #[arg(long, value_name = "WxH")]
    pub display_size: Option<FrameSize>,

    /// Only keep the video from this time
    #[arg(short, long)]
    pub start: Option<String>,

    /// Only keep the video up to this time
    #[arg(short, long)]
    pub end: Option<String>,

    /// Drop audio streams
    #[arg(long)]
    pub no_audio: bool,

    /// Constant Rate Factor (0-51)
    #[arg(long, value_parser = parse_crf)]
    pub crf: Option<u8>,

    /// Encoding preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Video codec
    #[arg(long)]
    pub codec: Option<String>,

    /// Replace the output if it exists
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// End time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Output file path (default: auto-generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace the output if it exists
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Frame position: a timestamp or a percentage such as 50%
    #[arg(short, long)]
    pub at: Option<String>,

    /// Crop region to apply to the frame
    #[arg(short, long)]
    pub region: Option<CropRegion>,

    /// Size the region was selected on, WxH
    #[arg(long, value_name = "WxH")]
    pub display_size: Option<FrameSize>,

    /// Apply the default crop region when --region is not given
    #[arg(long)]
    pub crop: bool,

    /// Output image path (default: <input>_preview_<time>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace the output if it exists
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = InspectFormat::Text)]
    pub format: InspectFormat,
}
