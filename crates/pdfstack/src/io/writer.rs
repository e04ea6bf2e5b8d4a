//! Artifact export.
//!
//! Writes the bytes of a published artifact to disk:
//! - Atomic writes (temp file in the target directory, then rename)
//! - Blocking file I/O kept off the async runtime
//! - Pre-flight checks on the output directory
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::io::ArtifactWriter;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example(bytes: Arc<[u8]>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = ArtifactWriter::new();
//! let stats = writer.write(bytes, Path::new("merged.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::task;

use crate::error::{PdfStackError, Result};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    #[serde(skip)]
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes artifact bytes to files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter;

impl ArtifactWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `bytes` to `path`, replacing any existing file.
    ///
    /// The bytes go to a temporary file next to `path` first, which is then
    /// renamed over it, so readers never observe a half-written file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The temporary file cannot be created
    /// - Writing or flushing fails
    /// - The rename fails
    pub async fn write(&self, bytes: Arc<[u8]>, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || {
            let start = Instant::now();
            let temp_path = temp_path_for(&path_buf);

            let result = write_file(&temp_path, &bytes).and_then(|()| {
                std::fs::rename(&temp_path, &path_buf).map_err(|e| PdfStackError::FailedToWrite {
                    path: path_buf.clone(),
                    source: e,
                })
            });

            if let Err(err) = result {
                let _ = std::fs::remove_file(&temp_path);
                return Err(err);
            }

            let file_size = std::fs::metadata(&path_buf)
                .map(|m| m.len())
                .unwrap_or(bytes.len() as u64);

            tracing::debug!(path = %path_buf.display(), size = file_size, "wrote artifact");

            Ok(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfStackError::other(format!("Write task failed: {e}")))?
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory doesn't exist
    /// - Parent directory is not writable
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
            PdfStackError::invalid_config(format!(
                "Output directory does not exist: {}",
                parent.display()
            ))
        })?;

        if !metadata.is_dir() {
            return Err(PdfStackError::invalid_config(format!(
                "Output directory is not a directory: {}",
                parent.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfStackError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    /// Check if a file exists at `path`.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("artifact")));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PdfStackError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| PdfStackError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
}
