use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{FfmpegAdapter, FfprobeAdapter, LocalFsAdapter, TomlConfigAdapter};
use crate::app::{
    crop_interactor::CropInteractor, inspect_interactor::InspectInteractor,
    preview_interactor::PreviewInteractor, trim_interactor::TrimInteractor,
};
use crate::engine::progress::{LoggingProgress, ProgressCallback};
use crate::ports::{ConfigPort, ExecutePort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn crop_interactor(&self) -> Arc<CropInteractor>;
    fn trim_interactor(&self) -> Arc<TrimInteractor>;
    fn preview_interactor(&self) -> Arc<PreviewInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    crop_interactor: Arc<CropInteractor>,
    trim_interactor: Arc<TrimInteractor>,
    preview_interactor: Arc<PreviewInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    /// Wire the ffmpeg-backed adapters from resolved configuration
    pub fn new(config: Arc<TomlConfigAdapter>) -> Self {
        let settings = config.settings();
        let probe_port = Arc::new(FfprobeAdapter::new(settings.engine.ffprobe.clone()));
        let execute_port = Arc::new(FfmpegAdapter::new(settings.engine.ffmpeg.clone()));
        let fs_port = Arc::new(LocalFsAdapter::new());
        let progress = Arc::new(LoggingProgress::new(Duration::from_millis(
            settings.logging.progress_interval_ms,
        )));

        Self::with_ports(probe_port, execute_port, fs_port, config, progress)
    }

    /// Wire interactors around arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        config_port: Arc<dyn ConfigPort>,
        progress: Arc<dyn ProgressCallback>,
    ) -> Self {
        let crop_interactor = Arc::new(CropInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
            Arc::clone(&progress),
        ));

        let trim_interactor = Arc::new(TrimInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
            Arc::clone(&progress),
        ));

        let preview_interactor = Arc::new(PreviewInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
            Arc::clone(&progress),
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&fs_port),
        ));

        Self {
            crop_interactor,
            trim_interactor,
            preview_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn crop_interactor(&self) -> Arc<CropInteractor> {
        Arc::clone(&self.crop_interactor)
    }

    fn trim_interactor(&self) -> Arc<TrimInteractor> {
        Arc::clone(&self.trim_interactor)
    }

    fn preview_interactor(&self) -> Arc<PreviewInteractor> {
        Arc::clone(&self.preview_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
