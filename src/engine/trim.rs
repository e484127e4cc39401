//! Lossless cut

use std::path::PathBuf;

use crate::domain::model::TrimRange;
use crate::engine::{base_args, path_arg, seconds_arg, EngineCommand};

/// Stream-copy the `range` of `input` into `output` without re-encoding.
///
/// The seek goes before `-i` so ffmpeg jumps to the nearest keyframe instead
/// of decoding from the start; with `-c copy` the cut therefore starts on a
/// keyframe at or before the requested start.
#[derive(Debug, Clone)]
pub struct TrimCommand {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: TrimRange,
}

impl EngineCommand for TrimCommand {
    fn args(&self) -> Vec<String> {
        let mut args = base_args();
        args.extend([
            "-ss".to_string(),
            self.range.start.to_ffmpeg(),
            "-i".to_string(),
            path_arg(&self.input),
            "-t".to_string(),
            seconds_arg(self.range.duration_seconds()),
            "-map".to_string(),
            "0:v?".to_string(),
            "-map".to_string(),
            "0:a?".to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
            path_arg(&self.output),
        ]);
        args
    }

    fn expected_duration(&self) -> f64 {
        self.range.duration_seconds()
    }
}
