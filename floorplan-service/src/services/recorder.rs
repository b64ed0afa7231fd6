//! File-backed provenance log: one pretty-printed JSON record per accepted request.

use crate::models::{FloorPlanRequest, GenerationResult, ProvenanceRecord};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Failed to prepare provenance directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write provenance record {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize provenance record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<RecorderError> for service_core::error::AppError {
    fn from(err: RecorderError) -> Self {
        service_core::error::AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Clone)]
pub struct ProvenanceRecorder {
    dir: PathBuf,
}

impl ProvenanceRecorder {
    /// Open the recorder, creating `dir` if it does not exist yet.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, RecorderError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| RecorderError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a record stamped with the current local time and return its path.
    pub async fn record(
        &self,
        request: &FloorPlanRequest,
        result: &GenerationResult,
    ) -> Result<PathBuf, RecorderError> {
        self.record_at(&Local::now(), request, result).await
    }

    /// Persist a record stamped with `at`.
    ///
    /// The file is named `request_<timestamp>.json`. If that name is taken by
    /// an earlier record from the same second, `_1`, `_2`, ... is appended so
    /// existing records are never overwritten.
    pub async fn record_at<Tz>(
        &self,
        at: &DateTime<Tz>,
        request: &FloorPlanRequest,
        result: &GenerationResult,
    ) -> Result<PathBuf, RecorderError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let record = ProvenanceRecord::new(at, request.clone(), result.clone());
        let contents = serde_json::to_vec_pretty(&record)?;

        let mut attempt: u32 = 0;
        loop {
            let path = self.dir.join(file_name(&record.timestamp, attempt));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    write_or_discard(&mut file, &path, &contents).await?;
                    if let Err(source) = file.sync_all().await {
                        drop(file);
                        return Err(discard(path, source).await);
                    }
                    tracing::info!(path = %path.display(), "Saved provenance record");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "Provenance record name taken");
                    attempt += 1;
                }
                Err(source) => return Err(RecorderError::Write { path, source }),
            }
        }
    }
}

/// Write `contents` to the freshly created record at `path`.
///
/// A failed write removes the partial file so the name is free again.
async fn write_or_discard<W>(writer: &mut W, path: &Path, contents: &[u8]) -> Result<(), RecorderError>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(contents).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    match written {
        Ok(()) => Ok(()),
        Err(source) => Err(discard(path.to_path_buf(), source).await),
    }
}

async fn discard(path: PathBuf, source: std::io::Error) -> RecorderError {
    if let Err(e) = fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial provenance record");
    }
    RecorderError::Write { path, source }
}

fn file_name(timestamp: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("request_{}.json", timestamp)
    } else {
        format!("request_{}_{}.json", timestamp, attempt)
    }
}
