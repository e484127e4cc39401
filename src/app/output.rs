// Output stage shared by the rendering interactors

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::OverwritePolicy;
use crate::engine::progress::ProgressCallback;
use crate::engine::EngineCommand;
use crate::ports::*;

async fn same_file(fs: &dyn FsPort, a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs.canonicalize(a).await, fs.canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Refuse to clobber the input, or an existing output unless the policy allows it
pub(crate) async fn check_output(
    fs: &dyn FsPort,
    input: &Path,
    output: &Path,
    policy: OverwritePolicy,
) -> Result<(), DomainError> {
    if same_file(fs, input, output).await {
        return Err(DomainError::OutputIsInput(output.display().to_string()));
    }
    if policy == OverwritePolicy::Never && fs.exists(output).await? {
        return Err(DomainError::OutputExists(output.display().to_string()));
    }
    Ok(())
}

/// Run the engine into a temporary file next to `output`, then move it into
/// place. The temporary file is removed when the engine fails.
pub(crate) async fn render<C, F>(
    fs: &dyn FsPort,
    execute: &dyn ExecutePort,
    progress: Arc<dyn ProgressCallback>,
    output: &Path,
    build: F,
) -> Result<ExecutionReport, DomainError>
where
    C: EngineCommand,
    F: FnOnce(PathBuf) -> C,
{
    let temp = fs.temp_output_path(output).await?;
    let command = build(temp.clone());
    let args = command.args();
    debug!(?args, "Built engine command");

    let result = match execute.run(&args, command.expected_duration(), progress).await {
        Ok(report) => fs.persist(&temp, output).await.map(|_| report),
        Err(e) => Err(e),
    };

    if result.is_err() {
        if let Err(cleanup) = fs.remove(&temp).await {
            warn!("Failed to remove temporary file {}: {}", temp.display(), cleanup);
        }
    }
    result
}
