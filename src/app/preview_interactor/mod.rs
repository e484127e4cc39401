// Preview interactor - Extract one frame to check a crop before encoding

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::app::output::{check_output, render};
use crate::app::parse_clock;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::progress::ProgressCallback;
use crate::engine::PreviewCommand;
use crate::ports::*;

/// Seconds kept clear of the end when no frame rate is known
const END_MARGIN: f64 = 0.1;

/// Where in the video the preview frame is taken
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewAt {
    Time(ClockTime),
    /// Percentage of the duration, 0 - 100
    Percent(f64),
}

impl Default for PreviewAt {
    fn default() -> Self {
        PreviewAt::Time(ClockTime::default())
    }
}

impl PreviewAt {
    /// Parse `N%` or a timestamp
    pub fn parse(input: &str, lenient: bool) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if let Some(percent) = trimmed.strip_suffix('%') {
            let value: f64 = percent
                .trim()
                .parse()
                .map_err(|_| DomainError::timestamp(input, "percentage is not a number"))?;
            if !(0.0..=100.0).contains(&value) {
                return Err(DomainError::timestamp(input, "percentage must be between 0 and 100"));
            }
            return Ok(PreviewAt::Percent(value));
        }
        parse_clock(trimmed, lenient).map(PreviewAt::Time)
    }

    /// Resolve to a seek time inside a video of `duration` seconds.
    /// The last usable time sits `last_frame` seconds before the end.
    pub fn resolve(&self, duration: f64, last_frame: f64) -> f64 {
        let mut position = PlaybackPosition::new(duration);
        let time = match self {
            PreviewAt::Percent(percent) => position.seek_fraction(percent / 100.0),
            PreviewAt::Time(time) if position.duration() > 0.0 => {
                position.update_time(time.as_seconds());
                position.current()
            }
            PreviewAt::Time(time) => return time.as_seconds(),
        };
        if duration > 0.0 {
            time.min((duration - last_frame).max(0.0))
        } else {
            time
        }
    }
}

impl FromStr for PreviewAt {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}

impl fmt::Display for PreviewAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewAt::Time(time) => write!(f, "{}", time),
            PreviewAt::Percent(percent) => write!(f, "{}%", percent),
        }
    }
}

/// Interactor for the preview use case
pub struct PreviewInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
    progress: Arc<dyn ProgressCallback>,
}

impl PreviewInteractor {
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        config_port: Arc<dyn ConfigPort>,
        progress: Arc<dyn ProgressCallback>,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            config_port,
            progress,
        }
    }

    /// Write a single (optionally cropped) frame to an image
    pub async fn execute(&self, request: PreviewRequest) -> Result<PreviewResponse, DomainError> {
        let settings = self.config_port.settings();

        if !self.fs_port.exists(&request.input).await? {
            return Err(DomainError::FileNotFound(request.input.display().to_string()));
        }

        let at = match &request.at {
            Some(text) => PreviewAt::parse(text, settings.timestamps.lenient_fields)?,
            None => PreviewAt::default(),
        };

        let media = self.probe_port.probe(&request.input).await?;
        let frame = media.frame_size()?;

        let region = if request.crop || request.region.is_some() {
            Some(CropFitter::resolve(request.region, request.display_size, frame)?)
        } else {
            None
        };

        let last_frame = media
            .primary_video_stream()
            .filter(|v| v.frame_rate > 0.0)
            .map(|v| 1.0 / v.frame_rate)
            .unwrap_or(END_MARGIN);
        let time = ClockTime::from_seconds(at.resolve(media.duration, last_frame));
        let position = {
            let mut position = PlaybackPosition::new(media.duration);
            position.update_time(time.as_seconds());
            position
        };
        info!("Extracting preview frame at {}", position);

        let output = request
            .output
            .clone()
            .unwrap_or_else(|| OutputNamer::for_preview(&request.input, &time));
        let policy = request.overwrite.unwrap_or(settings.output.overwrite);
        check_output(self.fs_port.as_ref(), &request.input, &output, policy).await?;

        render(
            self.fs_port.as_ref(),
            self.execute_port.as_ref(),
            Arc::clone(&self.progress),
            &output,
            |temp| PreviewCommand {
                input: request.input.clone(),
                output: temp,
                at: time,
                region,
            },
        )
        .await?;

        Ok(PreviewResponse {
            output,
            at: time,
            region,
            frame,
        })
    }
}

/// Request for the preview use case
#[derive(Debug, Clone, Default)]
pub struct PreviewRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Timestamp or `N%`; the first frame when absent
    pub at: Option<String>,
    pub region: Option<CropRegion>,
    pub display_size: Option<FrameSize>,
    /// Apply the default crop when no region is given
    pub crop: bool,
    pub overwrite: Option<OverwritePolicy>,
}

/// Response from the preview use case
#[derive(Debug, Clone)]
pub struct PreviewResponse {
    pub output: PathBuf,
    pub at: ClockTime,
    pub region: Option<CropRegion>,
    /// Source frame size
    pub frame: FrameSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        assert_eq!(PreviewAt::parse("50%", false).unwrap(), PreviewAt::Percent(50.0));
        assert_eq!(PreviewAt::parse(" 12.5 % ", false).unwrap(), PreviewAt::Percent(12.5));
        assert!(PreviewAt::parse("150%", false).is_err());
        assert!(PreviewAt::parse("abc%", false).is_err());
    }

    #[test]
    fn test_parse_time() {
        match PreviewAt::parse("00:01:30", false).unwrap() {
            PreviewAt::Time(time) => assert_eq!(time.as_seconds(), 90.0),
            other => panic!("expected a time, got {:?}", other),
        }
        assert!(PreviewAt::parse("1:2:3:4", false).is_err());
    }

    #[test]
    fn test_resolve_percent() {
        assert_eq!(PreviewAt::Percent(50.0).resolve(120.0, 0.04), 60.0);
        assert_eq!(PreviewAt::Percent(0.0).resolve(120.0, 0.04), 0.0);
    }

    #[test]
    fn test_resolve_keeps_clear_of_end() {
        let end = PreviewAt::Percent(100.0).resolve(10.0, 0.5);
        assert_eq!(end, 9.5);
        let past = PreviewAt::Time(ClockTime::from_seconds(30.0)).resolve(10.0, 0.5);
        assert_eq!(past, 9.5);
    }

    #[test]
    fn test_resolve_unknown_duration() {
        let at = PreviewAt::Time(ClockTime::from_seconds(7.0));
        assert_eq!(at.resolve(0.0, 0.1), 7.0);
        assert_eq!(PreviewAt::Percent(50.0).resolve(0.0, 0.1), 0.0);
    }
}
