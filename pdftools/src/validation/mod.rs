//! Input and output path validation.
//!
//! These checks are cheap and run before any document is parsed, so a
//! missing input or an unusable output path is reported before the
//! expensive steps start:
//! - File existence and accessibility checks
//! - Empty file detection
//! - Output path checks (parent directory, existing destination)
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let summary = validator
//!     .validate_inputs(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .await?;
//! println!("{} input(s), {}", summary.files_validated, summary.format_total_size());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::OverwriteMode;
use crate::error::{PdfToolsError, Result};
use crate::io::check_destination;
use crate::utils::format_file_size;

/// Summary of validating several input files.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    /// Number of files that passed validation.
    pub files_validated: usize,

    /// Total file size in bytes.
    pub total_size: u64,
}

impl ValidationSummary {
    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for command inputs and outputs.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` is an existing, readable, non-empty file.
    ///
    /// Returns the file size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - Path is not a regular file
    /// - File metadata cannot be read
    /// - File is empty
    pub async fn validate_input(&self, path: &Path) -> Result<u64> {
        if !path.exists() {
            return Err(PdfToolsError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfToolsError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| PdfToolsError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if metadata.len() == 0 {
            return Err(PdfToolsError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        Ok(metadata.len())
    }

    /// Validate several inputs in order, stopping at the first failure.
    pub async fn validate_inputs(&self, paths: &[PathBuf]) -> Result<ValidationSummary> {
        let mut summary = ValidationSummary::default();

        for path in paths {
            summary.total_size += self.validate_input(path).await?;
            summary.files_validated += 1;
        }

        debug!(
            files = summary.files_validated,
            size = summary.total_size,
            "validated inputs"
        );
        Ok(summary)
    }

    /// Check that a file can be written at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `path` is a directory
    /// - The parent directory does not exist
    /// - The file exists and `mode` forbids replacing it
    pub async fn validate_output(&self, path: &Path, mode: OverwriteMode) -> Result<()> {
        if path.is_dir() {
            return Err(PdfToolsError::validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && tokio::fs::metadata(parent).await.is_err()
        {
            return Err(PdfToolsError::validation(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }

        check_destination(path, mode)
    }
}
