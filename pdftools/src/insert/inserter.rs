//! The `insert` command: place source pages at chosen positions of a target.

use lopdf::Document;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info};

use crate::config::InsertConfig;
use crate::error::{PdfToolsError, Result};
use crate::insert::planner::{InsertionPlan, OutOfRange, pair_requests};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteStatistics};
use crate::pages::{
    duplicate_page, import_pages, materialize_inherited_attributes, page_ids, set_page_tree,
};
use crate::validation::Validator;

/// Outcome of an `insert` run.
#[derive(Debug, Clone)]
pub struct InsertResult {
    /// Where the composed document was written.
    pub destination: PathBuf,

    /// Pages of the target before insertion.
    pub target_pages: usize,

    /// Number of inserted pages.
    pub inserted: usize,

    /// Pages of the written document.
    pub total_pages: usize,

    /// Time spent loading, planning and composing.
    pub compose_time: Duration,

    /// Statistics of the final write.
    pub write_stats: WriteStatistics,
}

/// Runs `insert` requests.
pub struct Inserter {
    reader: PdfReader,
}

impl Inserter {
    /// Create an inserter with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Insert the configured source pages into the target and write the result.
    ///
    /// Selection lengths are checked before any file is opened, and the
    /// destination is checked before the inputs are loaded. Neither input
    /// file is modified.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The selections have different lengths
    /// - The destination exists and overwriting is not allowed
    /// - Either input is missing or not a PDF
    /// - A page or location lies outside its document
    /// - Writing the output fails
    pub async fn insert(&self, config: &InsertConfig) -> Result<InsertResult> {
        config.validate()?;
        let requests = pair_requests(&config.pages.zero_based(), &config.locations.zero_based())?;
        Validator::new()
            .validate_output(&config.destination, config.overwrite_mode)
            .await?;

        let start = Instant::now();
        let target = self.reader.load(&config.target).await?;
        let source = self.reader.load(&config.source).await?;

        let plan = InsertionPlan::new(&requests, source.page_count, target.page_count)
            .map_err(|err| out_of_range_error(err, &target, &source))?;
        let target_pages = target.page_count;

        debug!(
            target = %target.path.display(),
            source = %source.path.display(),
            steps = ?plan.steps(),
            "applying insertion plan"
        );

        let document =
            task::spawn_blocking(move || compose(target.document, source.document, &plan))
                .await
                .map_err(|e| PdfToolsError::other(format!("Insert task failed: {e}")))??;

        let total_pages = document.get_pages().len();
        let compose_time = start.elapsed();

        let writer = PdfWriter::new(config.overwrite_mode);
        let write_stats = writer
            .save_with_stats(document, &config.destination)
            .await?;

        info!(
            destination = %config.destination.display(),
            inserted = requests.len(),
            total_pages,
            "inserted pages"
        );

        Ok(InsertResult {
            destination: config.destination.clone(),
            target_pages,
            inserted: requests.len(),
            total_pages,
            compose_time,
            write_stats,
        })
    }
}

impl Default for Inserter {
    fn default() -> Self {
        Self::new()
    }
}

fn out_of_range_error(
    err: OutOfRange,
    target: &LoadedPdf,
    source: &LoadedPdf,
) -> PdfToolsError {
    match err {
        OutOfRange::Source { index, len } => PdfToolsError::InvalidPageRange {
            path: source.path.clone(),
            page: index + 1,
            total_pages: len,
        },
        OutOfRange::Destination { index, len } => PdfToolsError::InvalidInsertPosition {
            path: target.path.clone(),
            position: index + 1,
            max_position: len,
        },
    }
}

/// Import `source` into `target` and lay out the pages according to `plan`.
///
/// The first use of a source page takes the imported page itself; every
/// further use gets its own copy so each page object keeps a single parent.
fn compose(mut target: Document, source: Document, plan: &InsertionPlan) -> Result<Document> {
    materialize_inherited_attributes(&mut target)?;
    let mut sequence = page_ids(&target);

    let imported = import_pages(&mut target, source)?;
    let mut used = vec![false; imported.len()];

    plan.apply_with(&mut sequence, |index| {
        let page_id = imported.get(index).copied().ok_or_else(|| {
            PdfToolsError::operation_failed(format!("Source page {} was not imported", index + 1))
        })?;

        if std::mem::replace(&mut used[index], true) {
            duplicate_page(&mut target, page_id)
        } else {
            Ok(page_id)
        }
    })?;

    set_page_tree(&mut target, &sequence)?;
    Ok(target)
}
