//! PDF merging operations.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::merge::Merger;
//! use pdftools::config::{MergeConfig, OverwriteMode};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     output: PathBuf::from("merged.pdf"),
//!     overwrite_mode: OverwriteMode::NoClobber,
//! };
//!
//! let (stats, _) = Merger::new().merge_to_file(&config).await?;
//! println!("Merged {} pages", stats.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{MergeResult, MergeStatistics, Merger};

use crate::config::MergeConfig;
use crate::error::Result;
use lopdf::Document;

/// Merge multiple PDF files into an in-memory document.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// Returns an error if any merge step fails.
pub async fn merge_pdfs(config: &MergeConfig) -> Result<(Document, MergeStatistics)> {
    let result = Merger::new().merge(config).await?;
    Ok((result.document, result.statistics))
}
