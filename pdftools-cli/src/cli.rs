//! CLI argument parsing for pdftools.
//!
//! This module defines the command-line interface structure using `clap`.
//! Each subcommand's arguments convert into the matching library
//! configuration through `to_config`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdftools::config::{
    DEFAULT_DPI, GlobalOptions, ImageifyConfig, InsertConfig, MergeConfig, OutputFormat,
    OverwriteMode, PageList, PageSelection, SplitConfig, date_taken_or_now,
};
use pdftools::error::{PdfToolsError, Result};
use pdftools::utils::collect_paths_for_patterns;

/// Merge, split, re-arrange and rasterize PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdftools")]
#[command(version)]
#[command(about = "Merge, split, re-arrange and rasterize PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(long, global = true, overrides_with = "no_debug")]
    pub debug: bool,

    /// Only print warnings and errors to stderr (default)
    #[arg(long, global = true, overrides_with = "debug")]
    pub no_debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Options shared by every command.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            debug: self.debug && !self.no_debug,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Concatenate PDF files into one document
    Merge(MergeArgs),

    /// Write every page of a PDF to its own file
    Split(SplitArgs),

    /// Insert pages of one PDF at chosen positions of another
    Insert(InsertArgs),

    /// Render pages of a PDF to a single image tagged with its capture date
    Imageify(ImageifyArgs),
}

/// Arguments of `merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files in merge order, followed by the output path
    ///
    /// Inputs may be glob patterns:
    ///   pdftools merge chapter*.pdf appendix.pdf book.pdf
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

impl MergeArgs {
    /// Expand input patterns and build a merge configuration.
    ///
    /// The last path is the output. With no inputs before it, the merge
    /// configuration is rejected with "no input files".
    pub fn to_config(&self) -> Result<MergeConfig> {
        let (output, patterns) = self
            .paths
            .split_last()
            .ok_or(PdfToolsError::NoInputFiles)?;

        let config = MergeConfig {
            inputs: collect_paths_for_patterns(patterns)?,
            output: PathBuf::from(output),
            overwrite_mode: OverwriteMode::from_force(self.force),
        };
        config.validate()?;

        Ok(config)
    }
}

/// Arguments of `split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// PDF file to split
    #[arg(value_name = "PDF_FILE")]
    pub pdf_file: PathBuf,

    /// Directory for the page files (default: next to the input)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Overwrite page files that already exist
    #[arg(short, long)]
    pub force: bool,
}

impl SplitArgs {
    /// Build a split configuration.
    pub fn to_config(&self) -> Result<SplitConfig> {
        let config = SplitConfig {
            input: self.pdf_file.clone(),
            out_dir: self.out_dir.clone(),
            overwrite_mode: OverwriteMode::from_force(self.force),
        };
        config.validate()?;

        Ok(config)
    }
}

/// Arguments of `insert`.
#[derive(Args, Debug)]
pub struct InsertArgs {
    /// PDF receiving the pages
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// PDF the pages are taken from
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Where the resulting PDF is written
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// One-based source pages, e.g. "1,3"
    #[arg(value_name = "PAGE_SELECTION")]
    pub page_selection: String,

    /// One-based target positions, paired with the pages, e.g. "2,5"
    ///
    /// Each page is placed before the target page currently at that
    /// position; one past the last page appends.
    #[arg(value_name = "LOCATION_SELECTION")]
    pub location_selection: String,

    /// Overwrite the destination if it exists
    #[arg(short, long)]
    pub force: bool,
}

impl InsertArgs {
    /// Parse the selections and build an insert configuration.
    pub fn to_config(&self) -> Result<InsertConfig> {
        let config = InsertConfig {
            target: self.target.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            pages: PageList::parse(&self.page_selection)?,
            locations: PageList::parse(&self.location_selection)?,
            overwrite_mode: OverwriteMode::from_force(self.force),
        };
        config.validate()?;

        Ok(config)
    }
}

/// Arguments of `imageify`.
#[derive(Args, Debug)]
pub struct ImageifyArgs {
    /// PDF file to render
    #[arg(value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Pages to render, e.g. "1-3,5" (default: all pages)
    #[arg(long, value_name = "RANGE_LIST")]
    pub page_select: Option<String>,

    /// Output image path (default: the input path with the format's extension)
    #[arg(long, value_name = "PATH")]
    pub out_path: Option<PathBuf>,

    /// Delete the PDF after the image has been written
    #[arg(long, overrides_with = "no_replace")]
    pub replace: bool,

    /// Keep the PDF (default)
    #[arg(long, overrides_with = "replace")]
    pub no_replace: bool,

    /// Image format: jpg, png, tiff or webp
    #[arg(long, value_name = "FORMAT", default_value = "jpg")]
    pub format: String,

    /// Capture time for the EXIF tags, ISO 8601 (default: now)
    #[arg(long, value_name = "DATE")]
    pub date_taken: Option<String>,

    /// Render resolution in dots per inch
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DPI)]
    pub dpi: f32,

    /// Overwrite the output image if it exists
    #[arg(short, long)]
    pub force: bool,
}

impl ImageifyArgs {
    /// Parse format, selection and date, and build an imageify configuration.
    pub fn to_config(&self) -> Result<ImageifyConfig> {
        let page_selection = self
            .page_select
            .as_deref()
            .map(PageSelection::parse)
            .transpose()?;

        let config = ImageifyConfig {
            input: self.file_path.clone(),
            output: self.out_path.clone(),
            page_selection,
            format: self.format.parse::<OutputFormat>()?,
            replace: self.replace && !self.no_replace,
            date_taken: date_taken_or_now(self.date_taken.as_deref())?,
            dpi: self.dpi,
            overwrite_mode: OverwriteMode::from_force(self.force),
        };
        config.validate()?;

        Ok(config)
    }
}
