//! The `split` command: one single-page PDF per page of the input.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

use crate::config::SplitConfig;
use crate::error::{PdfToolsError, Result};
use crate::io::{PdfReader, PdfWriter, check_destination};
use crate::pages::{extract_page, page_ids};
use crate::utils::split_page_path;

/// Outcome of a `split` run.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Written files, in page order.
    pub outputs: Vec<PathBuf>,

    /// Number of pages of the input.
    pub page_count: usize,
}

/// Split the configured input into `<stem>-p<N>.pdf` files.
///
/// All output paths are checked against the overwrite mode before the first
/// file is written. With `out_dir` set, the directory is created if needed.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded, an output exists and
/// overwriting is not allowed, or a page cannot be written.
pub async fn split_pdf(config: &SplitConfig) -> Result<SplitResult> {
    config.validate()?;

    let loaded = PdfReader::new().load(&config.input).await?;
    let ids = page_ids(&loaded.document);

    let outputs: Vec<PathBuf> = (1..=ids.len())
        .map(|number| split_page_path(&config.input, config.out_dir.as_deref(), number))
        .collect();

    for output in &outputs {
        check_destination(output, config.overwrite_mode)?;
    }

    if let Some(dir) = &config.out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| PdfToolsError::FailedToCreateOutput {
                path: dir.clone(),
                source: e,
            })?;
    }

    let document = Arc::new(loaded.document);
    let writer = PdfWriter::new(config.overwrite_mode);

    for (page_id, output) in ids.into_iter().zip(&outputs) {
        let source = Arc::clone(&document);
        let single = task::spawn_blocking(move || extract_page(&source, page_id))
            .await
            .map_err(|e| PdfToolsError::other(format!("Split task failed: {e}")))??;

        writer.save(single, output).await?;
        debug!(output = %output.display(), "wrote page");
    }

    info!(
        input = %config.input.display(),
        pages = outputs.len(),
        "split PDF"
    );

    Ok(SplitResult {
        page_count: outputs.len(),
        outputs,
    })
}
