//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -print_format json -show_format -show_streams` and maps the
//! JSON document onto [`MediaInfo`].

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    binary: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter for the given executable
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, path: &Path) -> Result<MediaInfo, DomainError> {
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| DomainError::EngineNotFound {
                binary: self.binary.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFailed(format!(
                "{}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let json = String::from_utf8_lossy(&output.stdout);
        debug!(bytes = json.len(), "ffprobe output received");
        media_info_from_json(&path.to_string_lossy(), &json)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: usize,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    pix_fmt: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
    duration: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    format_name: Option<String>,
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

/// `30000/1001` style rational, `None` for `0/0`
fn parse_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    (den != 0.0 && num != 0.0).then(|| num / den)
}

fn parse_number<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

/// Map ffprobe's JSON document onto [`MediaInfo`]
pub fn media_info_from_json(path: &str, json: &str) -> Result<MediaInfo, DomainError> {
    let parsed: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::ProbeFailed(format!("{}: invalid ffprobe output: {}", path, e)))?;

    let mut info = MediaInfo {
        path: path.to_string(),
        container: "unknown".to_string(),
        duration: 0.0,
        file_size: 0,
        bit_rate: None,
        video_streams: Vec::new(),
        audio_streams: Vec::new(),
        subtitle_streams: Vec::new(),
    };

    let mut longest_stream = 0.0_f64;
    for stream in parsed.streams {
        if let Some(duration) = parse_number::<f64>(&stream.duration) {
            longest_stream = longest_stream.max(duration);
        }
        let codec = stream.codec_name.clone().unwrap_or_else(|| "unknown".to_string());

        match stream.codec_type.as_deref() {
            Some("video") => {
                // cover art is reported as a video stream
                if stream.tags.contains_key("mimetype") || stream.width.unwrap_or(0) == 0 {
                    continue;
                }
                let frame_rate = stream
                    .avg_frame_rate
                    .as_deref()
                    .and_then(parse_rate)
                    .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_rate))
                    .unwrap_or(0.0);
                info.video_streams.push(VideoStreamInfo {
                    index: stream.index,
                    codec,
                    width: stream.width.unwrap_or(0),
                    height: stream.height.unwrap_or(0),
                    frame_rate,
                    pixel_format: stream.pix_fmt,
                });
            }
            Some("audio") => info.audio_streams.push(AudioStreamInfo {
                index: stream.index,
                codec,
                sample_rate: parse_number(&stream.sample_rate).unwrap_or(0),
                channels: stream.channels.unwrap_or(0),
            }),
            Some("subtitle") => info.subtitle_streams.push(SubtitleStreamInfo {
                index: stream.index,
                codec,
                language: stream.tags.get("language").cloned(),
            }),
            _ => {}
        }
    }

    if let Some(format) = parsed.format {
        if let Some(name) = format.format_name.as_deref() {
            info.container = name.split(',').next().unwrap_or(name).to_string();
        }
        info.duration = parse_number(&format.duration).unwrap_or(0.0);
        info.file_size = parse_number(&format.size).unwrap_or(0);
        info.bit_rate = parse_number(&format.bit_rate);
    }

    if info.duration <= 0.0 {
        info.duration = longest_stream;
    }

    Ok(info)
}
