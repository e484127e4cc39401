// Crop interactor - Orchestrates the crop use case

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::output::{check_output, render};
use crate::app::resolve_range;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::progress::ProgressCallback;
use crate::engine::CropCommand;
use crate::ports::*;

/// Interactor for the crop use case
pub struct CropInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
    progress: Arc<dyn ProgressCallback>,
}

impl CropInteractor {
    /// Create new crop interactor with injected ports
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

    /// Crop the video to the requested region and re-encode it
    pub async fn execute(&self, request: CropRequest) -> Result<CropResponse, DomainError> {
        let settings = self.config_port.settings();
        info!("Starting crop of {}", request.input.display());

        if !self.fs_port.exists(&request.input).await? {
            return Err(DomainError::FileNotFound(request.input.display().to_string()));
        }

        let media = self.probe_port.probe(&request.input).await?;
        info!(
            streams = media.total_streams(),
            duration = media.duration,
            "Media file probed"
        );

        let frame = media.frame_size()?;
        let region = CropFitter::resolve(request.region, request.display_size, frame)?;
        match request.region {
            Some(requested) if requested != region => {
                info!("Crop region {} resolved to {} in the {} frame", requested, region, frame)
            }
            Some(_) => {}
            None => info!("No crop region given; using {}", region),
        }

        let (range, warnings) = resolve_range(
            request.start.as_deref(),
            request.end.as_deref(),
            media.duration,
            settings.timestamps.lenient_fields,
        )?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let output = request
            .output
            .clone()
            .unwrap_or_else(|| OutputNamer::for_crop(&request.input, &region));
        let policy = request.overwrite.unwrap_or(settings.output.overwrite);
        check_output(self.fs_port.as_ref(), &request.input, &output, policy).await?;

        let keep_audio = request.keep_audio && media.has_audio();
        let duration = range
            .map(|r| r.duration_seconds())
            .unwrap_or(media.duration);

        let mut encode = settings.encode.clone();
        if let Some(crf) = request.crf {
            encode.crf = crf;
        }
        if let Some(preset) = &request.preset {
            encode.preset = preset.clone();
        }
        if let Some(codec) = &request.video_codec {
            encode.video_codec = codec.clone();
        }

        let report = render(
            self.fs_port.as_ref(),
            self.execute_port.as_ref(),
            Arc::clone(&self.progress),
            &output,
            |temp| CropCommand {
                input: request.input.clone(),
                output: temp,
                region,
                range,
                keep_audio,
                encode,
                threads: settings.engine.threads,
                source_duration: media.duration,
            },
        )
        .await?;

        let output_size = self.fs_port.file_size(&output).await?;
        info!("Crop completed. Output: {}", output.display());

        Ok(CropResponse {
            output,
            region,
            range,
            duration,
            output_size,
            elapsed: report.elapsed,
            warnings,
        })
    }
}

/// Request for the crop use case
#[derive(Debug, Clone, Default)]
pub struct CropRequest {
    pub input: PathBuf,
    /// Defaults to a name derived from the input and region
    pub output: Option<PathBuf>,
    /// Region in display coordinates when `display_size` is set, source pixels otherwise
    pub region: Option<CropRegion>,
    pub display_size: Option<FrameSize>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub keep_audio: bool,
    pub crf: Option<u8>,
    pub preset: Option<String>,
    pub video_codec: Option<String>,
    pub overwrite: Option<OverwritePolicy>,
}

/// Response from the crop use case
#[derive(Debug, Clone)]
pub struct CropResponse {
    pub output: PathBuf,
    /// Region applied, in source pixels
    pub region: CropRegion,
    pub range: Option<TrimRange>,
    /// Output length in seconds
    pub duration: f64,
    pub output_size: u64,
    pub elapsed: Duration,
    pub warnings: Vec<String>,
}
