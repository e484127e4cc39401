// Inspect interactor - Orchestrates media file inspection use case

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::Utils;

/// Output format for inspection results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InspectFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Interactor for media file inspection use case
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            probe_port,
            fs_port,
        }
    }

    /// Execute media file inspection
    pub async fn execute(&self, request: InspectRequest) -> Result<InspectResponse, DomainError> {
        info!("Starting media file inspection for: {}", request.input.display());

        if !self.fs_port.exists(&request.input).await? {
            return Err(DomainError::FileNotFound(request.input.display().to_string()));
        }

        let media_info = self.probe_port.probe(&request.input).await?;
        info!(
            "Media file probed successfully: {} streams",
            media_info.total_streams()
        );

        let summary = match request.format {
            InspectFormat::Json => serde_json::to_string_pretty(&media_info)
                .map_err(|e| DomainError::Format(format!("JSON serialization failed: {}", e)))?,
            InspectFormat::Yaml => serde_yaml::to_string(&media_info)
                .map_err(|e| DomainError::Format(format!("YAML serialization failed: {}", e)))?,
            InspectFormat::Text => format_as_text(&media_info),
        };

        Ok(InspectResponse {
            media_info,
            summary,
        })
    }
}

/// Human-readable summary of `media_info`
pub fn format_as_text(media_info: &MediaInfo) -> String {
    let mut output = String::new();

    // writing into a String cannot fail
    let _ = writeln!(output, "Media File Information:");
    let _ = writeln!(output, "  File: {}", media_info.path);
    let _ = writeln!(output, "  Container: {}", media_info.container);
    let _ = writeln!(
        output,
        "  Duration: {} ({:.3}s)",
        format_clock(media_info.duration),
        media_info.duration
    );
    let _ = writeln!(
        output,
        "  File Size: {}",
        Utils::format_file_size(media_info.file_size)
    );
    if let Some(bit_rate) = media_info.bit_rate {
        let _ = writeln!(output, "  Bit Rate: {} kb/s", bit_rate / 1000);
    }
    let _ = writeln!(output, "  Total Streams: {}", media_info.total_streams());

    if !media_info.video_streams.is_empty() {
        let _ = writeln!(output, "\nVideo Streams ({}):", media_info.video_streams.len());
        for stream in &media_info.video_streams {
            let _ = writeln!(
                output,
                "  Stream #{}: {}x{} @ {:.2}fps, {}{}",
                stream.index,
                stream.width,
                stream.height,
                stream.frame_rate,
                stream.codec,
                stream
                    .pixel_format
                    .as_deref()
                    .map(|p| format!(" ({})", p))
                    .unwrap_or_default()
            );
        }
    }

    if !media_info.audio_streams.is_empty() {
        let _ = writeln!(output, "\nAudio Streams ({}):", media_info.audio_streams.len());
        for stream in &media_info.audio_streams {
            let _ = writeln!(
                output,
                "  Stream #{}: {} channels, {} Hz, {}",
                stream.index, stream.channels, stream.sample_rate, stream.codec
            );
        }
    }

    if !media_info.subtitle_streams.is_empty() {
        let _ = writeln!(
            output,
            "\nSubtitle Streams ({}):",
            media_info.subtitle_streams.len()
        );
        for stream in &media_info.subtitle_streams {
            let _ = writeln!(
                output,
                "  Stream #{}: {} ({})",
                stream.index,
                stream.codec,
                stream.language.as_deref().unwrap_or("unknown")
            );
        }
    }

    output
}

/// Request for media file inspection
#[derive(Debug, Clone, Default)]
pub struct InspectRequest {
    pub input: PathBuf,
    pub format: InspectFormat,
}

/// Response from media file inspection
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub media_info: MediaInfo,
    /// Rendered in the requested format
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MediaInfo {
        MediaInfo {
            path: "clip.mp4".to_string(),
            container: "mov".to_string(),
            duration: 75.5,
            file_size: 2 * 1024 * 1024,
            bit_rate: Some(1_500_000),
            video_streams: vec![VideoStreamInfo {
                index: 0,
                codec: "h264".to_string(),
                width: 1280,
                height: 720,
                frame_rate: 30.0,
                pixel_format: Some("yuv420p".to_string()),
            }],
            audio_streams: vec![AudioStreamInfo {
                index: 1,
                codec: "aac".to_string(),
                sample_rate: 48000,
                channels: 2,
            }],
            subtitle_streams: Vec::new(),
        }
    }

    #[test]
    fn test_format_as_text() {
        let text = format_as_text(&sample());
        assert!(text.contains("File: clip.mp4"));
        assert!(text.contains("Duration: 00:01:15"));
        assert!(text.contains("File Size: 2.00 MB"));
        assert!(text.contains("Bit Rate: 1500 kb/s"));
        assert!(text.contains("Stream #0: 1280x720 @ 30.00fps, h264 (yuv420p)"));
        assert!(text.contains("Stream #1: 2 channels, 48000 Hz, aac"));
        assert!(!text.contains("Subtitle Streams"));
    }
}
