//! ffmpeg invocation builders
//!
//! Each operation marshals its parameters into an ffmpeg argument vector.
//! Nothing here decodes or muxes media; the engine does all of that.

use std::path::Path;

pub mod crop;
pub mod preview;
pub mod progress;
pub mod trim;

pub use crop::CropCommand;
pub use preview::PreviewCommand;
pub use trim::TrimCommand;

/// An engine invocation
pub trait EngineCommand {
    /// Full argument vector, excluding the executable
    fn args(&self) -> Vec<String>;

    /// Length of the output in seconds, used for progress reporting
    fn expected_duration(&self) -> f64;
}

/// Flags shared by every invocation: quiet banner, no stdin, overwrite the
/// reserved temp file, machine-readable progress on stdout
pub(crate) fn base_args() -> Vec<String> {
    [
        "-hide_banner",
        "-nostdin",
        "-y",
        "-loglevel",
        "error",
        "-nostats",
        "-progress",
        "pipe:1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Seconds rendered for `-t`
pub(crate) fn seconds_arg(seconds: f64) -> String {
    format!("{:.3}", seconds)
}
