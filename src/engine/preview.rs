//! Single-frame preview extraction

use std::path::PathBuf;

use crate::domain::model::{ClockTime, CropRegion};
use crate::engine::crop::crop_filter;
use crate::engine::{base_args, path_arg, EngineCommand};

/// Write the frame at `at` (optionally cropped) to an image file
#[derive(Debug, Clone)]
pub struct PreviewCommand {
    pub input: PathBuf,
    pub output: PathBuf,
    pub at: ClockTime,
    pub region: Option<CropRegion>,
}

impl EngineCommand for PreviewCommand {
    fn args(&self) -> Vec<String> {
        let mut args = base_args();
        args.extend([
            "-ss".to_string(),
            self.at.to_ffmpeg(),
            "-i".to_string(),
            path_arg(&self.input),
            "-map".to_string(),
            "0:v:0".to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
        ]);
        if let Some(region) = &self.region {
            args.extend(["-vf".to_string(), crop_filter(region)]);
        }
        args.extend([
            "-update".to_string(),
            "1".to_string(),
            path_arg(&self.output),
        ]);
        args
    }

    fn expected_duration(&self) -> f64 {
        0.0
    }
}
