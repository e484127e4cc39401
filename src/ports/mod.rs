// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::progress::ProgressCallback;

/// Port for media file probing and analysis
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe media file and return its container and stream information
    async fn probe(&self, path: &Path) -> Result<MediaInfo, DomainError>;
}

/// Port for running the external media engine
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run the engine with `args`, reporting progress against `expected_duration` seconds
    async fn run(
        &self,
        args: &[String],
        expected_duration: f64,
        progress: Arc<dyn ProgressCallback>,
    ) -> Result<ExecutionReport, DomainError>;
}

/// Outcome of a successful engine run
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub elapsed: Duration,
    /// Last output timestamp the engine reported, in seconds
    pub out_time: f64,
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn file_size(&self, path: &Path) -> Result<u64, DomainError>;

    /// Reserve a temporary path next to `final_path`, with the same extension
    async fn temp_output_path(&self, final_path: &Path) -> Result<PathBuf, DomainError>;

    /// Move a finished temporary file into place
    async fn persist(&self, temp_path: &Path, final_path: &Path) -> Result<(), DomainError>;

    /// Delete file
    async fn remove(&self, path: &Path) -> Result<(), DomainError>;

    /// Absolute path with links resolved; fails when the path does not exist
    async fn canonicalize(&self, path: &Path) -> Result<PathBuf, DomainError>;
}

/// Port for configuration access
pub trait ConfigPort: Send + Sync {
    fn settings(&self) -> &Settings;
}

/// Effective configuration after file, environment and CLI layering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub engine: EngineSettings,
    pub encode: EncodeSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
    pub timestamps: TimestampSettings,
}

impl Settings {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.engine.ffmpeg.trim().is_empty() || self.engine.ffprobe.trim().is_empty() {
            return Err(DomainError::Config(
                "engine.ffmpeg and engine.ffprobe must not be empty".to_string(),
            ));
        }
        if self.engine.threads == 0 {
            return Err(DomainError::Config("engine.threads must be at least 1".to_string()));
        }
        if self.encode.crf > 51 {
            return Err(DomainError::Config("encode.crf cannot exceed 51".to_string()));
        }
        if self.encode.video_codec.trim().is_empty() {
            return Err(DomainError::Config("encode.video_codec must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Media engine executables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    pub ffmpeg: String,
    pub ffprobe: String,
    pub threads: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            threads: optimal_thread_count(),
        }
    }
}

/// Three quarters of the cores, between 1 and 16
pub fn optimal_thread_count() -> usize {
    let cpu_count = num_cpus::get();
    ((cpu_count * 3 + 3) / 4).clamp(1, 16)
}

/// Re-encoding parameters used by the crop operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeSettings {
    pub video_codec: String,
    pub crf: u8,
    pub preset: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf: 18,
            preset: "veryfast".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub overwrite: OverwritePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `framecut_cli=debug`
    pub level: String,
    pub format: LogFormat,
    pub progress_interval_ms: u64,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            progress_interval_ms: 500,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Pretty,
    /// JSON format for structured logging
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimestampSettings {
    /// Zero out-of-range minute/second fields instead of rejecting them
    pub lenient_fields: bool,
}
