// Trim interactor - Lossless cut between two timestamps

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::output::{check_output, render};
use crate::app::parse_clock;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::progress::ProgressCallback;
use crate::engine::TrimCommand;
use crate::ports::*;

/// Interactor for the trim use case
pub struct TrimInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
    progress: Arc<dyn ProgressCallback>,
}

impl TrimInteractor {
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

    /// Copy the streams between start and end into a new file without re-encoding
    pub async fn execute(&self, request: TrimRequest) -> Result<TrimResponse, DomainError> {
        let settings = self.config_port.settings();
        info!("Starting trim of {}", request.input.display());

        if !self.fs_port.exists(&request.input).await? {
            return Err(DomainError::FileNotFound(request.input.display().to_string()));
        }

        let lenient = settings.timestamps.lenient_fields;
        let start = parse_clock(&request.start, lenient)?;
        let end = parse_clock(&request.end, lenient)?;
        let requested = TrimRange::new(start, end)?;

        let media = self.probe_port.probe(&request.input).await?;
        info!(
            streams = media.total_streams(),
            duration = media.duration,
            "Media file probed"
        );

        let (range, warnings) = TrimValidator::validate(requested, media.duration)?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let output = request
            .output
            .clone()
            .unwrap_or_else(|| OutputNamer::for_trim(&request.input, &range));
        let policy = request.overwrite.unwrap_or(settings.output.overwrite);
        check_output(self.fs_port.as_ref(), &request.input, &output, policy).await?;

        info!("Trimming {}", range);
        let report = render(
            self.fs_port.as_ref(),
            self.execute_port.as_ref(),
            Arc::clone(&self.progress),
            &output,
            |temp| TrimCommand {
                input: request.input.clone(),
                output: temp,
                range,
            },
        )
        .await?;

        let output_size = self.fs_port.file_size(&output).await?;
        info!("Trim completed. Output: {}", output.display());

        Ok(TrimResponse {
            output,
            range,
            output_size,
            elapsed: report.elapsed,
            warnings,
        })
    }
}

/// Request for the trim use case
#[derive(Debug, Clone, Default)]
pub struct TrimRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub start: String,
    pub end: String,
    pub overwrite: Option<OverwritePolicy>,
}

/// Response from the trim use case
#[derive(Debug, Clone)]
pub struct TrimResponse {
    pub output: PathBuf,
    /// Range actually cut, after clamping to the media
    pub range: TrimRange,
    pub output_size: u64,
    pub elapsed: Duration,
    pub warnings: Vec<String>,
}
