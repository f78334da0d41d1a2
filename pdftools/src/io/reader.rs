//! PDF reading and loading operations.
//!
//! Loading goes through lopdf on a blocking task so the async callers never
//! stall the runtime while a large document is parsed.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("a.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfToolsError, Result};
use crate::utils::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone, Default)]
pub struct LoadStatistics {
    /// Number of PDFs loaded.
    pub success_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_loaded(loaded: &[LoadedPdf], total_time: Duration) -> Self {
        Self {
            success_count: loaded.len(),
            total_time,
            total_size: loaded.iter().map(|l| l.file_size).sum(),
            total_pages: loaded.iter().map(|l| l.page_count).sum(),
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader that rejects unreadable, encrypted and page-less documents.
#[derive(Debug, Clone)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        if !path.exists() {
            return Err(PdfToolsError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfToolsError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let doc = task::spawn_blocking({
            let path_buf = path_buf.clone();
            move || Document::load(&path_buf)
        })
        .await
        .map_err(|e| PdfToolsError::other(format!("Load task failed: {e}")))?
        .map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfToolsError::encrypted_pdf(path_buf.clone())
            } else {
                PdfToolsError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if doc.get_pages().is_empty() {
            return Err(PdfToolsError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let loaded = LoadedPdf::new(doc, path_buf, start.elapsed());
        debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            "loaded PDF in {:?}",
            loaded.load_time
        );

        Ok(loaded)
    }

    /// Load multiple PDF documents one at a time, in the order provided.
    ///
    /// Stops at the first failure.
    pub async fn load_sequential(
        &self,
        paths: &[PathBuf],
    ) -> Result<(Vec<LoadedPdf>, LoadStatistics)> {
        let start = Instant::now();
        let mut loaded = Vec::with_capacity(paths.len());

        for path in paths {
            loaded.push(self.load(path).await?);
        }

        let stats = LoadStatistics::from_loaded(&loaded, start.elapsed());
        Ok((loaded, stats))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
