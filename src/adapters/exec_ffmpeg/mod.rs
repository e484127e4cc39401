//! FFmpeg execution adapter
//!
//! Runs the ffmpeg executable as a child process, streams `-progress` output
//! from stdout and keeps the tail of stderr for error reports.

use std::collections::VecDeque;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::engine::progress::{ProgressCallback, ProgressParser, ProgressTracker};
use crate::ports::*;

/// Lines of stderr kept for error messages
const STDERR_TAIL_LINES: usize = 12;

/// FFmpeg-based execution adapter
pub struct FfmpegAdapter {
    binary: String,
}

impl FfmpegAdapter {
    /// Create new FFmpeg adapter for the given executable
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn collect_tail<R: AsyncRead + Unpin>(reader: R) -> String {
        let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if tail.len() == STDERR_TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line);
        }
        Vec::from(tail).join("\n")
    }
}

fn not_captured(stream: &str) -> DomainError {
    DomainError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("ffmpeg {} not captured", stream),
    ))
}

#[async_trait]
impl ExecutePort for FfmpegAdapter {
    async fn run(
        &self,
        args: &[String],
        expected_duration: f64,
        progress: Arc<dyn ProgressCallback>,
    ) -> Result<ExecutionReport, DomainError> {
        debug!(binary = %self.binary, ?args, "Spawning ffmpeg");
        let started = Instant::now();

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DomainError::EngineNotFound {
                binary: self.binary.clone(),
                reason: e.to_string(),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| not_captured("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| not_captured("stderr"))?;

        let stderr_task = tokio::spawn(Self::collect_tail(stderr));

        let mut parser = ProgressParser::new();
        let mut tracker = ProgressTracker::new(expected_duration, progress);
        tracker.start();

        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(event) = parser.feed(&line) {
                tracker.handle(event);
            }
        }

        let status = child.wait().await?;
        let stderr_tail = match stderr_task.await {
            Ok(tail) => tail,
            Err(e) => {
                warn!("stderr reader failed: {}", e);
                String::new()
            }
        };

        if !status.success() {
            return Err(DomainError::EngineFailed {
                code: status
                    .code()
                    .map(|c| format!("exit code {}", c))
                    .unwrap_or_else(|| "a signal".to_string()),
                stderr_tail,
            });
        }

        if !stderr_tail.is_empty() {
            debug!("ffmpeg stderr: {}", stderr_tail);
        }

        Ok(ExecutionReport {
            elapsed: started.elapsed(),
            out_time: tracker.position().current(),
        })
    }
}
