// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Clock-style timestamp (HH:MM:SS with optional milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl ClockTime {
    /// Create a timestamp from total seconds, rounded to the millisecond
    pub fn from_seconds(total: f64) -> Self {
        if !total.is_finite() || total <= 0.0 {
            return Self::default();
        }

        let millis = (total * 1000.0).round() as u64;
        Self {
            hours: (millis / 3_600_000) as u32,
            minutes: ((millis % 3_600_000) / 60_000) as u32,
            seconds: (millis % 60_000) as f64 / 1000.0,
        }
    }

    /// Total seconds
    pub fn as_seconds(&self) -> f64 {
        self.hours as f64 * 3600.0 + self.minutes as f64 * 60.0 + self.seconds
    }

    /// Parse `HH:MM:SS[.fff]`, `MM:SS[.fff]` or `SS[.fff]`
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::timestamp(input, "empty timestamp"));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [secs] => Ok(Self::from_seconds(parse_seconds_field(input, secs)?)),
            [mins, secs] => {
                let minutes = parse_whole_field(input, mins, "minutes")?;
                let seconds = parse_seconds_field(input, secs)?;
                if seconds >= 60.0 {
                    return Err(DomainError::timestamp(input, "seconds must be less than 60"));
                }
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, mins, secs] => {
                let hours = parse_whole_field(input, hours, "hours")?;
                let minutes = parse_whole_field(input, mins, "minutes")?;
                let seconds = parse_seconds_field(input, secs)?;
                if minutes >= 60 {
                    return Err(DomainError::timestamp(input, "minutes must be less than 60"));
                }
                if seconds >= 60.0 {
                    return Err(DomainError::timestamp(input, "seconds must be less than 60"));
                }
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::timestamp(
                input,
                "expected HH:MM:SS, MM:SS or seconds",
            )),
        }
    }

    /// Build a timestamp from three separate form fields.
    ///
    /// Blank fields count as zero. Minute and second fields that are not a
    /// number from 0 to 59 are replaced by zero rather than rejected; the hour
    /// field accepts any whole number.
    pub fn from_fields(hour: &str, minute: &str, second: &str) -> Self {
        let hours = hour.trim().parse::<u32>().unwrap_or(0);
        let minutes = sanitize_clock_field(minute);
        let seconds = sanitize_clock_field(second);

        Self {
            hours,
            minutes,
            seconds: seconds as f64,
        }
    }

    /// Lenient parse: split on `:` into fields (right-aligned) and apply
    /// [`ClockTime::from_fields`]
    pub fn parse_lenient(input: &str) -> Self {
        let mut fields: Vec<&str> = input.trim().rsplitn(3, ':').collect();
        fields.resize(3, "");
        Self::from_fields(fields[2], fields[1], fields[0])
    }

    /// Render as `HH:MM:SS.mmm` for engine arguments
    pub fn to_ffmpeg(&self) -> String {
        let millis = (self.seconds * 1000.0).round() as u64;
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            self.hours,
            self.minutes,
            millis / 1000,
            millis % 1000
        )
    }

    /// Render as `HHhMMmSSs`, safe for file names
    pub fn to_file_stamp(&self) -> String {
        format!(
            "{:02}h{:02}m{:02}s",
            self.hours,
            self.minutes,
            self.seconds.floor() as u64
        )
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_seconds().partial_cmp(&other.as_seconds())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = (self.seconds * 1000.0).round() as u64;
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, millis / 1000)?;
        if millis % 1000 != 0 {
            write!(f, ".{:03}", millis % 1000)?;
        }
        Ok(())
    }
}

impl FromStr for ClockTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_whole_field(input: &str, field: &str, name: &str) -> Result<u32, DomainError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::timestamp(input, format!("invalid {} field '{}'", name, field)));
    }
    field
        .parse::<u32>()
        .map_err(|_| DomainError::timestamp(input, format!("{} out of range", name)))
}

fn parse_seconds_field(input: &str, field: &str) -> Result<f64, DomainError> {
    let mut pieces = field.splitn(2, '.');
    let whole = pieces.next().unwrap_or_default();
    let frac = pieces.next();

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || frac.is_some_and(|f| !digits(f)) {
        return Err(DomainError::timestamp(input, format!("invalid seconds field '{}'", field)));
    }

    field
        .parse::<f64>()
        .map_err(|_| DomainError::timestamp(input, format!("invalid seconds field '{}'", field)))
}

fn clock_field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-5]?\d)$").expect("clock field pattern is valid"))
}

/// Minute/second form field: a number from 0 to 59, anything else becomes 0
pub fn sanitize_clock_field(value: &str) -> u32 {
    let value = value.trim();
    if clock_field_pattern().is_match(value) {
        value.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Floor `seconds` to whole seconds and render zero-padded `HH:MM:SS`
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Start/end timestamps of a lossless cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TrimRange {
    /// Create a range; the end must come strictly after the start
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        if end == start {
            return Err(DomainError::EmptyRange(start.to_string()));
        }
        Ok(Self { start, end })
    }

    /// Length of the range in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.end.as_seconds() - self.start.as_seconds()
    }
}

impl fmt::Display for TrimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// Rectangle to extract from every frame, in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// 720 px high with a 9:12 width-per-height ratio, anchored top-left
    pub const DEFAULT: CropRegion = CropRegion {
        x: 0,
        y: 0,
        width: 540,
        height: 720,
    };

    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Parse `WxH`, `WxH+X+Y` or `W:H:X:Y`
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            [
                r"^(?P<w>\d+)x(?P<h>\d+)$",
                r"^(?P<w>\d+)x(?P<h>\d+)\+(?P<x>\d+)\+(?P<y>\d+)$",
                r"^(?P<w>\d+):(?P<h>\d+):(?P<x>\d+):(?P<y>\d+)$",
            ]
            .map(|p| Regex::new(p).expect("crop pattern is valid"))
        });

        let trimmed = input.trim();
        let captures = patterns
            .iter()
            .find_map(|re| re.captures(trimmed))
            .ok_or_else(|| DomainError::InvalidCrop(input.to_string()))?;

        let field = |name: &str| -> Result<u32, DomainError> {
            match captures.name(name) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| DomainError::InvalidCrop(input.to_string())),
                None => Ok(0),
            }
        };

        let region = Self {
            width: field("w")?,
            height: field("h")?,
            x: field("x")?,
            y: field("y")?,
        };

        if region.width == 0 || region.height == 0 {
            return Err(DomainError::InvalidCrop(input.to_string()));
        }
        Ok(region)
    }

    /// Exclusive right edge
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for CropRegion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl FromStr for CropRegion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Pixel dimensions of a frame or display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse `WxH`
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let (w, h) = input
            .trim()
            .split_once('x')
            .ok_or_else(|| DomainError::InvalidSize(input.to_string()))?;
        let width: u32 = w
            .parse()
            .map_err(|_| DomainError::InvalidSize(input.to_string()))?;
        let height: u32 = h
            .parse()
            .map_err(|_| DomainError::InvalidSize(input.to_string()))?;
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidSize(input.to_string()));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for FrameSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Current playback time of one video against its duration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackPosition {
    current: f64,
    duration: f64,
}

impl PlaybackPosition {
    pub fn new(duration: f64) -> Self {
        let mut position = Self::default();
        position.set_duration(duration);
        position
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Set the known duration (unknown or negative counts as zero)
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.current = self.current.min(self.duration);
    }

    /// Record a new playback time, clamped to the duration
    pub fn update_time(&mut self, time: f64) {
        self.current = if time.is_finite() {
            time.clamp(0.0, self.duration)
        } else {
            0.0
        };
    }

    /// Jump to a fraction (0.0 - 1.0) of the duration and return the new time
    pub fn seek_fraction(&mut self, fraction: f64) -> f64 {
        let time = self.duration * fraction.clamp(0.0, 1.0);
        self.current = if time.is_nan() { 0.0 } else { time };
        self.current
    }

    /// Completed share of the duration, 0.0 when the duration is unknown
    pub fn fraction(&self) -> f64 {
        if self.duration > 0.0 {
            self.current / self.duration
        } else {
            0.0
        }
    }
}

impl fmt::Display for PlaybackPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", format_clock(self.current), format_clock(self.duration))
    }
}

/// Video stream information
#[derive(Debug, Clone, Serialize)]
pub struct VideoStreamInfo {
    pub index: usize,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub pixel_format: Option<String>,
}

impl VideoStreamInfo {
    pub fn frame_size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }
}

/// Audio stream information
#[derive(Debug, Clone, Serialize)]
pub struct AudioStreamInfo {
    pub index: usize,
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u32,
}

/// Subtitle stream information
#[derive(Debug, Clone, Serialize)]
pub struct SubtitleStreamInfo {
    pub index: usize,
    pub codec: String,
    pub language: Option<String>,
}

/// Complete media file information
#[derive(Debug, Clone, Serialize)]
pub struct MediaInfo {
    pub path: String,
    pub container: String,
    pub duration: f64,
    pub file_size: u64,
    pub bit_rate: Option<u64>,
    pub video_streams: Vec<VideoStreamInfo>,
    pub audio_streams: Vec<AudioStreamInfo>,
    pub subtitle_streams: Vec<SubtitleStreamInfo>,
}

impl MediaInfo {
    /// Get primary video stream (the first one)
    pub fn primary_video_stream(&self) -> Option<&VideoStreamInfo> {
        self.video_streams.first()
    }

    /// Frame size of the primary video stream
    pub fn frame_size(&self) -> Result<FrameSize, DomainError> {
        self.primary_video_stream()
            .map(VideoStreamInfo::frame_size)
            .ok_or_else(|| DomainError::NoVideoStream(self.path.clone()))
    }

    pub fn has_audio(&self) -> bool {
        !self.audio_streams.is_empty()
    }

    /// Get total number of streams
    pub fn total_streams(&self) -> usize {
        self.video_streams.len() + self.audio_streams.len() + self.subtitle_streams.len()
    }
}

/// What to do when the output path is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    #[default]
    Never,
    Always,
}

impl FromStr for OverwritePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(OverwritePolicy::Never),
            "always" => Ok(OverwritePolicy::Always),
            other => Err(DomainError::Config(format!(
                "Invalid overwrite policy '{}'. Valid policies: never, always",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests;
