//! Frame-by-frame region crop

use std::path::PathBuf;

use crate::domain::model::{CropRegion, TrimRange};
use crate::engine::{base_args, path_arg, seconds_arg, EngineCommand};
use crate::ports::EncodeSettings;

/// `crop=W:H:X:Y` filter expression
pub fn crop_filter(region: &CropRegion) -> String {
    format!(
        "crop={}:{}:{}:{}",
        region.width, region.height, region.x, region.y
    )
}

/// Re-encode the video stream of `input` with every frame cut down to `region`.
///
/// Audio is stream-copied unless `keep_audio` is off. An optional `range`
/// limits the output to that part of the input.
#[derive(Debug, Clone)]
pub struct CropCommand {
    pub input: PathBuf,
    pub output: PathBuf,
    pub region: CropRegion,
    pub range: Option<TrimRange>,
    pub keep_audio: bool,
    pub encode: EncodeSettings,
    pub threads: usize,
    /// Duration of the input, used when no range is given
    pub source_duration: f64,
}

impl EngineCommand for CropCommand {
    fn args(&self) -> Vec<String> {
        let mut args = base_args();

        if let Some(range) = &self.range {
            args.extend(["-ss".to_string(), range.start.to_ffmpeg()]);
        }
        args.extend(["-i".to_string(), path_arg(&self.input)]);
        if let Some(range) = &self.range {
            args.extend(["-t".to_string(), seconds_arg(range.duration_seconds())]);
        }

        args.extend(["-map".to_string(), "0:v:0".to_string()]);
        if self.keep_audio {
            args.extend([
                "-map".to_string(),
                "0:a?".to_string(),
                "-c:a".to_string(),
                "copy".to_string(),
            ]);
        } else {
            args.push("-an".to_string());
        }

        args.extend([
            "-vf".to_string(),
            crop_filter(&self.region),
            "-c:v".to_string(),
            self.encode.video_codec.clone(),
            "-crf".to_string(),
            self.encode.crf.to_string(),
            "-preset".to_string(),
            self.encode.preset.clone(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-threads".to_string(),
            self.threads.to_string(),
            path_arg(&self.output),
        ]);
        args
    }

    fn expected_duration(&self) -> f64 {
        self.range
            .map(|range| range.duration_seconds())
            .unwrap_or(self.source_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ClockTime;

    fn command() -> CropCommand {
        CropCommand {
            input: PathBuf::from("in.mp4"),
            output: PathBuf::from("out.mp4"),
            region: CropRegion::new(10, 20, 640, 480),
            range: None,
            keep_audio: true,
            encode: EncodeSettings::default(),
            threads: 4,
            source_duration: 30.0,
        }
    }

    fn position(args: &[String], flag: &str) -> Option<usize> {
        args.iter().position(|a| a == flag)
    }

    #[test]
    fn test_crop_filter() {
        assert_eq!(crop_filter(&CropRegion::new(10, 20, 640, 480)), "crop=640:480:10:20");
    }

    #[test]
    fn test_crop_args_with_audio() {
        let args = command().args();
        let vf = position(&args, "-vf").unwrap();
        assert_eq!(args[vf + 1], "crop=640:480:10:20");
        let ca = position(&args, "-c:a").unwrap();
        assert_eq!(args[ca + 1], "copy");
        assert!(position(&args, "-an").is_none());
        assert!(position(&args, "-ss").is_none());
        assert_eq!(args.last().unwrap(), "out.mp4");
        assert_eq!(command().expected_duration(), 30.0);
    }

    #[test]
    fn test_crop_args_without_audio_and_with_range() {
        let mut command = command();
        command.keep_audio = false;
        command.range = Some(
            TrimRange::new(ClockTime::from_seconds(5.0), ClockTime::from_seconds(8.0)).unwrap(),
        );

        let args = command.args();
        assert!(position(&args, "-an").is_some());
        assert!(position(&args, "-c:a").is_none());
        let ss = position(&args, "-ss").unwrap();
        let input = position(&args, "-i").unwrap();
        assert!(ss < input, "seek must precede the input");
        assert_eq!(args[position(&args, "-t").unwrap() + 1], "3.000");
        assert_eq!(command.expected_duration(), 3.0);
    }
}
