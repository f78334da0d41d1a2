//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Overwrite protection
//! - Atomic writes (write to temp file, then rename)
//! - Compression and object renumbering
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::config::OverwriteMode;
//! use pdftools::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new(OverwriteMode::NoClobber);
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::config::OverwriteMode;
use crate::error::{PdfToolsError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Drop unreferenced objects and renumber the rest.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,

    /// Behavior when the destination already exists.
    pub overwrite_mode: OverwriteMode,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: true,
            buffer_size: 8192,
            overwrite_mode: OverwriteMode::NoClobber,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Fail if `path` exists and `mode` forbids replacing it.
///
/// Commands call this for every output before doing any work, so a
/// collision is reported without leaving partial results behind.
pub fn check_destination(path: &Path, mode: OverwriteMode) -> Result<()> {
    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber if path.exists() => {
            Err(PdfToolsError::destination_exists(path.to_path_buf()))
        }
        OverwriteMode::NoClobber => Ok(()),
    }
}

/// Sibling path used while an atomic write is in flight.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Create `path`, fill it through `write` and flush it.
///
/// Once the file exists, any failure removes it again.
fn write_file<F>(path: &Path, buffer_size: usize, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| PdfToolsError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = BufWriter::with_capacity(buffer_size, file);
    let written = write(&mut writer).and_then(|()| writer.flush());
    drop(writer);

    written.map_err(|e| {
        let _ = std::fs::remove_file(path);
        PdfToolsError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// PDF writer with configurable behavior.
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options and the given overwrite mode.
    pub fn new(overwrite_mode: OverwriteMode) -> Self {
        Self {
            options: WriteOptions {
                overwrite_mode,
                ..Default::default()
            },
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Destination exists and overwriting is not allowed
    /// - Output directory doesn't exist
    /// - Write operation fails
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    pub async fn save_with_stats(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        check_destination(path, self.options.overwrite_mode)?;

        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            if options.optimize {
                doc.prune_objects();
                doc.renumber_objects();
            }

            if options.compress {
                doc.compress();
            }

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            write_file(&write_path, options.buffer_size, |writer| {
                doc.save_to(writer).map(|_| ()).map_err(std::io::Error::other)
            })?;

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    let _ = std::fs::remove_file(&write_path);
                    PdfToolsError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfToolsError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
                compressed: options.compress,
            })
        })
        .await
        .map_err(|e| PdfToolsError::other(format!("Write task failed: {e}")))??;

        debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            "wrote PDF in {:?}",
            stats.write_time
        );

        Ok(stats)
    }
}
