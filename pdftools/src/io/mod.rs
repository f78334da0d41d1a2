//! I/O operations for pdftools.
//!
//! This module handles all file I/O operations including:
//! - Loading PDF documents from disk
//! - Writing PDFs to disk with overwrite protection
//! - Removing consumed inputs
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::config::OverwriteMode;
//! use pdftools::io::{PdfReader, PdfWriter};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let doc = reader.load(&PathBuf::from("input.pdf")).await?;
//!
//! let writer = PdfWriter::new(OverwriteMode::NoClobber);
//! writer.save(doc.document, &PathBuf::from("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics, check_destination};

use crate::error::{PdfToolsError, Result};
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from a file.
///
/// Convenience function for loading a single PDF.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid PDF.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    let reader = PdfReader::new();
    let loaded = reader.load(path).await?;
    Ok(loaded.document)
}

/// Delete a file that has been fully consumed by a command.
pub async fn remove_input(path: &Path) -> Result<()> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| PdfToolsError::FileNotAccessible {
            path: path.to_path_buf(),
            source: e,
        })
}
