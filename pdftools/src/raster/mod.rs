//! The `imageify` command: render pages, stitch them into one image and tag
//! it with the capture time.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::config::{ImageifyConfig, OutputFormat, OverwriteMode, DEFAULT_DPI};
//! use pdftools::raster::imageify;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ImageifyConfig {
//!     input: PathBuf::from("receipt.pdf"),
//!     output: None,
//!     page_selection: None,
//!     format: OutputFormat::Jpeg,
//!     replace: false,
//!     date_taken: chrono::Local::now().naive_local(),
//!     dpi: DEFAULT_DPI,
//!     overwrite_mode: OverwriteMode::NoClobber,
//! };
//!
//! let result = imageify(&config).await?;
//! println!("wrote {}", result.output.display());
//! # Ok(())
//! # }
//! ```

pub mod exif;
pub mod render;
pub mod stitch;

pub use exif::{format_exif_date, write_capture_dates};
pub use render::{HayroRenderer, PageRenderer};
pub use stitch::{encode_image, stitch_vertical};

use chrono::NaiveDateTime;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

use crate::config::{ImageifyConfig, PageSelection};
use crate::error::{PdfToolsError, Result};
use crate::io::remove_input;
use crate::validation::Validator;

/// Outcome of an `imageify` run.
#[derive(Debug, Clone)]
pub struct ImageifyResult {
    /// Written image.
    pub output: PathBuf,

    /// Zero-based pages that were rendered.
    pub pages: Vec<usize>,

    /// Size of the stitched image in pixels.
    pub dimensions: (u32, u32),

    /// Whether the input PDF was deleted.
    pub replaced: bool,
}

/// Zero-based pages to render: the selection, or every page.
///
/// # Errors
///
/// Returns [`PdfToolsError::InvalidPageRange`] for a selected page past the
/// end of the document.
pub fn resolve_pages(
    selection: Option<&PageSelection>,
    page_count: usize,
    path: &Path,
) -> Result<Vec<usize>> {
    let Some(selection) = selection else {
        return Ok((0..page_count).collect());
    };

    let last_page = selection.last_page();
    if last_page > page_count {
        return Err(PdfToolsError::InvalidPageRange {
            path: path.to_path_buf(),
            page: last_page,
            total_pages: page_count,
        });
    }

    Ok(selection.indices(page_count))
}

/// Render `pages` with `renderer` and stitch them into one image.
pub fn rasterize<R: PageRenderer + ?Sized>(
    renderer: &R,
    pages: &[usize],
    scale: f32,
) -> Result<RgbaImage> {
    let rendered = pages
        .iter()
        .map(|&index| renderer.render_page(index, scale))
        .collect::<Result<Vec<_>>>()?;

    stitch_vertical(&rendered)
}

/// Tag the image at `output` with its capture time.
///
/// An image that cannot be tagged is removed, so a rerun is not blocked by
/// an untagged leftover.
fn tag_or_discard(output: &Path, taken: &NaiveDateTime) -> Result<()> {
    write_capture_dates(output, taken).inspect_err(|_| {
        let _ = std::fs::remove_file(output);
    })
}

/// Convert the configured PDF to a stitched, date-tagged image.
///
/// Steps, in order: validate the configuration, check the output path,
/// render and stitch, encode and write, tag the capture dates, then delete
/// the input if `replace` is set. A failure at any step leaves the input in
/// place.
///
/// # Errors
///
/// Returns an error if the input is missing or not a PDF, a selected page is
/// out of range, the output exists and overwriting is not allowed, or any
/// render, encode, write or tagging step fails.
pub async fn imageify(config: &ImageifyConfig) -> Result<ImageifyResult> {
    config.validate()?;

    let output = config.output_path();
    let validator = Validator::new();
    validator
        .validate_output(&output, config.overwrite_mode)
        .await?;
    validator.validate_input(&config.input).await?;

    let data = tokio::fs::read(&config.input)
        .await
        .map_err(|e| PdfToolsError::FileNotAccessible {
            path: config.input.clone(),
            source: e,
        })?;

    let (encoded, pages, dimensions) = task::spawn_blocking({
        let input = config.input.clone();
        let selection = config.page_selection.clone();
        let format = config.format;
        let scale = config.scale();

        move || {
            let renderer = HayroRenderer::new(data, &input)?;
            let page_count = renderer.page_count();
            if page_count == 0 {
                return Err(PdfToolsError::corrupted_pdf(input, "PDF has no pages"));
            }

            let pages = resolve_pages(selection.as_ref(), page_count, &input)?;
            debug!(pages = ?pages, scale, "rendering pages");

            let image = rasterize(&renderer, &pages, scale)?;
            let dimensions = image.dimensions();
            let encoded = encode_image(image, format)?;

            Ok::<_, PdfToolsError>((encoded, pages, dimensions))
        }
    })
    .await
    .map_err(|e| PdfToolsError::other(format!("Render task failed: {e}")))??;

    tokio::fs::write(&output, &encoded)
        .await
        .map_err(|e| PdfToolsError::FailedToWrite {
            path: output.clone(),
            source: e,
        })?;

    task::spawn_blocking({
        let output = output.clone();
        let taken = config.date_taken;
        move || tag_or_discard(&output, &taken)
    })
    .await
    .map_err(|e| PdfToolsError::other(format!("Tagging task failed: {e}")))??;

    if config.replace {
        remove_input(&config.input).await?;
        debug!(input = %config.input.display(), "removed input");
    }

    info!(
        input = %config.input.display(),
        output = %output.display(),
        pages = pages.len(),
        "imageified PDF"
    );

    Ok(ImageifyResult {
        output,
        pages,
        dimensions,
        replaced: config.replace,
    })
}
