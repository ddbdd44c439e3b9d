//! Append-only log of received text.
//!
//! The ingest listener appends raw payloads; the stats runtime re-reads the
//! whole log to rebuild its engine.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, Empty, empty};
use tokio::sync::Mutex;
use tokio_util::either::Either;

#[derive(Debug, Error)]
pub enum WordLogError {
    #[error("failed to open word log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("word log {path} is a directory")]
    IsDirectory { path: PathBuf },

    #[error("failed to append to word log {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reader over the log contents; empty when the log does not exist yet.
pub type WordLogReader = Either<File, Empty>;

#[derive(Debug)]
pub struct WordLog {
    path: PathBuf,
    // Serializes appends from this process so payloads never interleave.
    append_lock: Mutex<()>,
}

impl WordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `payload` followed by a newline, creating the log if needed.
    pub async fn append(&self, payload: &[u8]) -> Result<(), WordLogError> {
        let mut line = Vec::with_capacity(payload.len() + 1);
        line.extend_from_slice(payload);
        line.push(b'\n');

        let _guard = self.append_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| WordLogError::Open {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(&line)
            .await
            .map_err(|source| self.append_error(source))?;
        file.flush().await.map_err(|source| self.append_error(source))
    }

    /// Open the log for reading from the start.
    pub async fn open(&self) -> Result<WordLogReader, WordLogError> {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Either::Right(empty()));
            }
            Err(source) => {
                return Err(WordLogError::Open {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let metadata = file.metadata().await.map_err(|source| WordLogError::Open {
            path: self.path.clone(),
            source,
        })?;

        if metadata.is_dir() {
            return Err(WordLogError::IsDirectory {
                path: self.path.clone(),
            });
        }

        Ok(Either::Left(file))
    }

    fn append_error(&self, source: std::io::Error) -> WordLogError {
        WordLogError::Append {
            path: self.path.clone(),
            source,
        }
    }
}
