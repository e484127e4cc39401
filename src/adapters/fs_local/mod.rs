// Local filesystem adapter - File system operations through tokio::fs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Self {
        Self
    }

    fn parent_dir(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(tokio::fs::try_exists(path).await?)
    }

    async fn file_size(&self, path: &Path) -> Result<u64, DomainError> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    async fn temp_output_path(&self, final_path: &Path) -> Result<PathBuf, DomainError> {
        let dir = Self::parent_dir(final_path);
        tokio::fs::create_dir_all(&dir).await?;

        // keep the extension so ffmpeg picks the same muxer
        let suffix = final_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(".framecut-")
            .suffix(&suffix)
            .tempfile_in(&dir)?;
        let path = temp
            .into_temp_path()
            .keep()
            .map_err(|e| DomainError::Io(e.error))?;

        debug!("Reserved temporary output {}", path.display());
        Ok(path)
    }

    async fn persist(&self, temp_path: &Path, final_path: &Path) -> Result<(), DomainError> {
        tokio::fs::rename(temp_path, final_path).await?;
        Ok(())
    }

    async fn remove(&self, path: &Path) -> Result<(), DomainError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn canonicalize(&self, path: &Path) -> Result<PathBuf, DomainError> {
        Ok(tokio::fs::canonicalize(path).await?)
    }
}
