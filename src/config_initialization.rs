//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults.

use tracing::debug;

use crate::adapters::TomlConfigAdapter;
use crate::cli::Cli;
use crate::domain::errors::DomainError;
use crate::ports::{ConfigPort, Settings};

/// Resolve the settings for this run
pub fn initialize_configuration(cli: &Cli) -> Result<TomlConfigAdapter, DomainError> {
    let mut config = TomlConfigAdapter::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;
    let overrides = apply_cli_overrides(config.settings_mut(), cli);
    config.settings().validate()?;

    debug!(
        source = ?config.source(),
        cli_overrides = overrides,
        "Configuration resolved"
    );
    Ok(config)
}

/// Apply global CLI flags onto `settings`, returning how many were set
pub fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) -> usize {
    let mut overrides = 0;

    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
        overrides += 1;
    }
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
        overrides += 1;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        settings.engine.ffmpeg = ffmpeg.clone();
        overrides += 1;
    }
    if let Some(ffprobe) = &cli.ffprobe {
        settings.engine.ffprobe = ffprobe.clone();
        overrides += 1;
    }
    if let Some(threads) = cli.threads {
        settings.engine.threads = threads;
        overrides += 1;
    }
    if cli.lenient_timestamps {
        settings.timestamps.lenient_fields = true;
        overrides += 1;
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::toml_config::ENV_LOG;
    use crate::ports::LogFormat;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_file_settings() {
        let mut settings =
            TomlConfigAdapter::parse("[engine]\nffmpeg = \"/usr/bin/ffmpeg\"\nthreads = 4\n")
                .unwrap();
        let cli = Cli::try_parse_from([
            "framecut",
            "--threads",
            "2",
            "--log-format",
            "json",
            "inspect",
            "-i",
            "in.mp4",
        ])
        .unwrap();

        assert_eq!(apply_cli_overrides(&mut settings, &cli), 2);
        assert_eq!(settings.engine.threads, 2);
        assert_eq!(settings.engine.ffmpeg, "/usr/bin/ffmpeg");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert!(!settings.timestamps.lenient_fields);
    }

    #[test]
    fn test_log_level_precedence() {
        let file = TomlConfigAdapter::parse("[logging]\nlevel = \"error\"\n").unwrap();
        let mut config = TomlConfigAdapter::with_settings(file);
        config
            .apply_env(|key| (key == ENV_LOG).then(|| "warn".to_string()))
            .unwrap();
        assert_eq!(config.settings().logging.level, "warn");

        let without_flag = Cli::try_parse_from(["framecut", "inspect", "-i", "in.mp4"]).unwrap();
        apply_cli_overrides(config.settings_mut(), &without_flag);
        assert_eq!(config.settings().logging.level, "warn");

        let with_flag =
            Cli::try_parse_from(["framecut", "--log-level", "debug", "inspect", "-i", "in.mp4"])
                .unwrap();
        apply_cli_overrides(config.settings_mut(), &with_flag);
        assert_eq!(config.settings().logging.level, "debug");
        assert_eq!(
            crate::utils::logging::build_filter(&config.settings().logging.level)
                .unwrap()
                .to_string(),
            "debug"
        );
    }

    #[test]
    fn test_zero_threads_fails_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("framecut.toml");
        std::fs::write(&path, "").unwrap();
        let config = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "framecut", "--config", &config, "--threads", "0", "inspect", "-i", "in.mp4",
        ])
        .unwrap();
        assert!(initialize_configuration(&cli).is_err());
    }
}
