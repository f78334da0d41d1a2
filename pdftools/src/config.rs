//! Configuration module for pdftools.
//!
//! The CLI turns its arguments into one of the per-command configuration
//! structures defined here. Each structure is validated before any file is
//! touched, so argument mistakes are reported without side effects.
//!
//! This module also owns the small parsers for user-supplied values:
//! - one-based page lists (`"1,3,5"`) for `insert`
//! - page selections with ranges (`"1-3,5"`) for `imageify`
//! - output image formats
//! - capture dates

use anyhow::{Context, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PdfToolsError, Result};

/// Options shared by every command.
///
/// Passed explicitly into each command handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Emit debug-level diagnostics.
    pub debug: bool,
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Never overwrite, error if the destination exists (default).
    #[default]
    NoClobber,
    /// Always overwrite.
    Force,
}

impl OverwriteMode {
    /// Map a `--force` flag to an overwrite mode.
    pub fn from_force(force: bool) -> Self {
        if force { Self::Force } else { Self::NoClobber }
    }
}

/// A comma-separated list of one-based page numbers, e.g. `"1,3,5"`.
///
/// Order and duplicates are preserved: position `i` of a page list pairs with
/// position `i` of the matching location list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageList {
    pages: Vec<usize>,
}

impl PageList {
    /// Parse a page list.
    ///
    /// # Errors
    ///
    /// Returns an error for empty lists, empty entries, non-numeric entries
    /// and zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftools::config::PageList;
    ///
    /// let list = PageList::parse("2, 4,1").unwrap();
    /// assert_eq!(list.one_based(), &[2, 4, 1]);
    /// assert_eq!(list.zero_based(), vec![1, 3, 0]);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_inner(s).map_err(|e| PdfToolsError::invalid_page_selection(s, e.to_string()))
    }

    fn parse_inner(s: &str) -> anyhow::Result<Self> {
        if s.trim().is_empty() {
            bail!("list cannot be empty");
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let page: usize = part
                .parse()
                .with_context(|| format!("'{part}' is not a page number"))?;

            if page == 0 {
                bail!("page numbers are one-based, 0 is not allowed");
            }

            pages.push(page);
        }

        Ok(Self { pages })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Entries as given (one-based).
    pub fn one_based(&self) -> &[usize] {
        &self.pages
    }

    /// Entries converted to zero-based indices.
    pub fn zero_based(&self) -> Vec<usize> {
        self.pages.iter().map(|p| p - 1).collect()
    }
}

impl FromStr for PageList {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Page selection with single pages and ranges, e.g. `"1-3,5"`.
///
/// Single pages are one-based. A range `a-b` selects the zero-based
/// half-open interval `[a - 1, b)`: the start is converted from one-based,
/// the end is an exclusive zero-based bound. `"1-3,5"` selects zero-based
/// pages `0, 1, 2` and `4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    items: Vec<SelectionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectionItem {
    Single(usize),
    Range(usize, usize),
}

impl PageSelection {
    /// Parse a page selection string.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is invalid, a page number is zero or a
    /// range does not advance.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftools::config::PageSelection;
    ///
    /// let selection = PageSelection::parse("1-3,5").unwrap();
    /// assert_eq!(selection.indices(6), vec![0, 1, 2, 4]);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_inner(s).map_err(|e| PdfToolsError::invalid_page_selection(s, e.to_string()))
    }

    fn parse_inner(s: &str) -> anyhow::Result<Self> {
        let mut items = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                bail!("empty entry");
            }

            if let Some((start, end)) = part.split_once('-') {
                let start: usize = start
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid range start in '{part}'"))?;
                let end: usize = end
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid range end in '{part}'"))?;

                if start == 0 {
                    bail!("page numbers are one-based, 0 is not allowed");
                }

                if end < start {
                    bail!("range {start}-{end} selects no pages");
                }

                items.push(SelectionItem::Range(start, end));
            } else {
                let page: usize = part
                    .parse()
                    .with_context(|| format!("'{part}' is not a page number"))?;

                if page == 0 {
                    bail!("page numbers are one-based, 0 is not allowed");
                }

                items.push(SelectionItem::Single(page));
            }
        }

        Ok(Self { items })
    }

    /// Highest one-based page the selection reaches.
    pub fn last_page(&self) -> usize {
        self.items
            .iter()
            .map(|item| match *item {
                SelectionItem::Single(page) => page,
                SelectionItem::Range(_, end) => end,
            })
            .max()
            .unwrap_or(0)
    }

    /// Selected zero-based page indices below `page_count`, ascending and
    /// without duplicates.
    ///
    /// Items are clipped to the document before they are expanded; the result
    /// never holds more than `page_count` entries.
    pub fn indices(&self, page_count: usize) -> Vec<usize> {
        let mut selected = vec![false; page_count];

        for item in &self.items {
            let (start, end) = match *item {
                SelectionItem::Single(page) => (page - 1, page),
                SelectionItem::Range(start, end) => (start - 1, end),
            };
            for flag in selected.iter_mut().take(end).skip(start) {
                *flag = true;
            }
        }

        selected
            .iter()
            .enumerate()
            .filter_map(|(index, &on)| on.then_some(index))
            .collect()
    }
}

impl FromStr for PageSelection {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Raster format of the stitched image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JPEG, encoded without alpha.
    #[default]
    Jpeg,
    /// PNG.
    Png,
    /// TIFF.
    Tiff,
    /// Lossless WebP.
    WebP,
}

impl OutputFormat {
    /// Formats accepted on the command line.
    pub const SUPPORTED: &'static str = "jpg, jpeg, png, tiff, tif, webp";

    /// File extension used for derived output paths.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tiff",
            Self::WebP => "webp",
        }
    }

    /// Matching `image` crate format.
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::WebP => image::ImageFormat::WebP,
        }
    }

    /// Whether the encoder can store an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "tiff" | "tif" => Ok(Self::Tiff),
            "webp" => Ok(Self::WebP),
            _ => Err(PdfToolsError::UnsupportedFormat {
                format: s.to_string(),
                supported: Self::SUPPORTED.to_string(),
            }),
        }
    }
}

/// Parse the capture date given with `--date-taken`.
///
/// Accepts RFC 3339 (the offset is dropped, the wall-clock time is kept),
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`.
pub fn parse_date_taken(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            PdfToolsError::validation(format!(
                "Invalid --date-taken '{s}'. Expected an ISO 8601 date or date-time"
            ))
        })
}

/// The `--date-taken` value, or the local time now when it was not given.
pub fn date_taken_or_now(s: Option<&str>) -> Result<NaiveDateTime> {
    match s {
        Some(s) => parse_date_taken(s),
        None => Ok(Local::now().naive_local()),
    }
}

/// Configuration of `merge`.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths, in merge order.
    pub inputs: Vec<PathBuf>,
    /// Output PDF file path.
    pub output: PathBuf,
    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no inputs are given or the output is also an input.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfToolsError::NoInputFiles);
        }

        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(PdfToolsError::validation(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        Ok(())
    }
}

/// Configuration of `split`.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// PDF to split.
    pub input: PathBuf,
    /// Directory for the per-page files; the input's directory if `None`.
    pub out_dir: Option<PathBuf>,
    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl SplitConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.input.file_stem().is_none() {
            return Err(PdfToolsError::validation(format!(
                "Cannot derive output names from '{}'",
                self.input.display()
            )));
        }

        Ok(())
    }
}

/// Configuration of `insert`.
#[derive(Debug, Clone)]
pub struct InsertConfig {
    /// Document receiving the pages.
    pub target: PathBuf,
    /// Document the pages are taken from.
    pub source: PathBuf,
    /// Where the composed document is written.
    pub destination: PathBuf,
    /// One-based source pages.
    pub pages: PageList,
    /// One-based positions in the target, paired with `pages`.
    pub locations: PageList,
    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl InsertConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdfToolsError::MismatchedSelections`] if the two selections
    /// differ in length, and a validation error if the destination would
    /// overwrite one of the inputs.
    pub fn validate(&self) -> Result<()> {
        if self.pages.len() != self.locations.len() {
            return Err(PdfToolsError::MismatchedSelections {
                pages: self.pages.len(),
                locations: self.locations.len(),
            });
        }

        if self.destination == self.target || self.destination == self.source {
            return Err(PdfToolsError::validation(format!(
                "Destination cannot be one of the input files: {}",
                self.destination.display()
            )));
        }

        Ok(())
    }
}

/// Default render resolution of `imageify`.
pub const DEFAULT_DPI: f32 = 200.0;

/// Configuration of `imageify`.
#[derive(Debug, Clone)]
pub struct ImageifyConfig {
    /// PDF to rasterize.
    pub input: PathBuf,
    /// Output image path; derived from the input stem if `None`.
    pub output: Option<PathBuf>,
    /// Pages to render; every page if `None`.
    pub page_selection: Option<PageSelection>,
    /// Output image format.
    pub format: OutputFormat,
    /// Delete the input PDF after success.
    pub replace: bool,
    /// Capture time written to the EXIF tags.
    pub date_taken: NaiveDateTime,
    /// Render resolution in dots per inch.
    pub dpi: f32,
    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl ImageifyConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(PdfToolsError::validation(format!(
                "DPI must be a positive number, got {}",
                self.dpi
            )));
        }

        if self.output.as_ref() == Some(&self.input) {
            return Err(PdfToolsError::validation(
                "Output image cannot overwrite the input PDF",
            ));
        }

        Ok(())
    }

    /// Render scale relative to 72 points per inch.
    pub fn scale(&self) -> f32 {
        self.dpi / 72.0
    }

    /// The output path, derived from the input when not given.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| crate::utils::derive_image_path(&self.input, self.format))
    }
}
