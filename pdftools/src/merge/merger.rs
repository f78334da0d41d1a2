//! Core PDF merging implementation.
//!
//! Inputs are concatenated in the order given: the first document becomes
//! the base, every further document is imported into it and its pages are
//! appended to the base's page tree.

use lopdf::Document;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info};

use crate::config::MergeConfig;
use crate::error::{PdfToolsError, Result};
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::pages::{import_pages, materialize_inherited_attributes, page_ids, set_page_tree};
use crate::utils::format_file_size;
use crate::validation::Validator;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that combines multiple documents.
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Merge the configured inputs into one in-memory document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No inputs are given
    /// - An input file cannot be loaded
    /// - The page tree of an input cannot be read
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdftools::merge::Merger;
    /// # use pdftools::config::MergeConfig;
    /// # async fn example(config: MergeConfig) -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Merger::new().merge(&config).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, config: &MergeConfig) -> Result<MergeResult> {
        config.validate()?;
        let merge_start = Instant::now();

        let (loaded, load_stats) = self.reader.load_sequential(&config.inputs).await?;
        let load_time = load_stats.total_time;

        let merged_files: Vec<PathBuf> = loaded.iter().map(|l| l.path.clone()).collect();
        let documents: Vec<Document> = loaded.into_iter().map(|l| l.document).collect();

        let document = task::spawn_blocking(move || merge_documents(documents))
            .await
            .map_err(|e| PdfToolsError::other(format!("Merge task failed: {e}")))??;

        let statistics = MergeStatistics {
            files_merged: merged_files.len(),
            total_pages: document.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size: load_stats.total_size,
        };

        debug!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            "merged documents in {:?}",
            statistics.merge_time
        );

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
        })
    }

    /// Merge the configured inputs and write the result to the configured output.
    ///
    /// The output path and every input are checked before any input is
    /// parsed, so a collision, a missing input or an empty input list leaves
    /// the filesystem untouched.
    pub async fn merge_to_file(
        &self,
        config: &MergeConfig,
    ) -> Result<(MergeStatistics, WriteStatistics)> {
        config.validate()?;

        let validator = Validator::new();
        validator
            .validate_output(&config.output, config.overwrite_mode)
            .await?;
        validator.validate_inputs(&config.inputs).await?;

        let result = self.merge(config).await?;

        let writer = PdfWriter::new(config.overwrite_mode);
        let write_stats = writer.save_with_stats(result.document, &config.output).await?;

        info!(
            output = %config.output.display(),
            files = result.statistics.files_merged,
            pages = result.statistics.total_pages,
            "merged PDFs"
        );

        Ok((result.statistics, write_stats))
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate documents, in order, into the first one.
fn merge_documents(documents: Vec<Document>) -> Result<Document> {
    let mut documents = documents.into_iter();
    let mut merged = documents.next().ok_or(PdfToolsError::NoInputFiles)?;

    materialize_inherited_attributes(&mut merged)?;
    let mut pages = page_ids(&merged);

    for doc in documents {
        pages.extend(import_pages(&mut merged, doc)?);
    }

    set_page_tree(&mut merged, &pages)?;
    Ok(merged)
}
