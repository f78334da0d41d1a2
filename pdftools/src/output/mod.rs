//! User-facing output for pdftools commands.
//!
//! Each command has a summary function that prints its result through an
//! [`OutputFormatter`]. The CLI calls these after a command succeeds.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::config::GlobalOptions;
//! use pdftools::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::from_options(&GlobalOptions::default());
//! formatter.success("Merge completed successfully");
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::insert::InsertResult;
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;
use crate::raster::ImageifyResult;
use crate::split::SplitResult;

/// Display the result of `merge`.
pub fn display_merge_summary(
    formatter: &OutputFormatter,
    stats: &MergeStatistics,
    write: &WriteStatistics,
) {
    formatter.success(&format!(
        "Merged {} file(s) into {} ({} pages, {})",
        stats.files_merged,
        write.output_path.display(),
        stats.total_pages,
        write.format_file_size()
    ));
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", stats.load_time.as_secs_f64()),
    );
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
}

/// Display the result of `split`.
pub fn display_split_summary(formatter: &OutputFormatter, result: &SplitResult) {
    formatter.success(&format!("Split into {} file(s)", result.outputs.len()));
    for (index, path) in result.outputs.iter().enumerate() {
        formatter.list_item(index + 1, &path.display().to_string());
    }
}

/// Display the result of `insert`.
pub fn display_insert_summary(formatter: &OutputFormatter, result: &InsertResult) {
    formatter.success(&format!(
        "Inserted {} page(s) into {} ({} pages)",
        result.inserted,
        result.destination.display(),
        result.total_pages
    ));
    formatter.detail("Target pages", &result.target_pages.to_string());
    formatter.detail("Output size", &result.write_stats.format_file_size());
}

/// Display the result of `imageify`.
pub fn display_imageify_summary(formatter: &OutputFormatter, result: &ImageifyResult) {
    let (width, height) = result.dimensions;
    formatter.success(&format!(
        "Wrote {} ({} page(s), {width}x{height})",
        result.output.display(),
        result.pages.len()
    ));
    if result.replaced {
        formatter.info("Removed the source PDF");
    }
}
