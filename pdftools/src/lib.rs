//! pdftools - Merge, split, re-arrange and rasterize PDF files.
//!
//! This library provides the document operations behind the `pdftools`
//! command line tool:
//!
//! - Merging several PDFs into one, in order
//! - Splitting a PDF into single-page files
//! - Inserting pages of one PDF at chosen positions of another
//! - Rendering pages to one stitched image tagged with its capture date
//!
//! # Examples
//!
//! ## Insert pages
//!
//! ```no_run
//! use pdftools::config::{InsertConfig, OverwriteMode, PageList};
//! use pdftools::insert::Inserter;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Source page 1 before target page 2, source page 2 before target page 4.
//! let config = InsertConfig {
//!     target: PathBuf::from("report.pdf"),
//!     source: PathBuf::from("figures.pdf"),
//!     destination: PathBuf::from("report-with-figures.pdf"),
//!     pages: PageList::parse("1,2")?,
//!     locations: PageList::parse("2,4")?,
//!     overwrite_mode: OverwriteMode::NoClobber,
//! };
//!
//! let result = Inserter::new().insert(&config).await?;
//! println!("Wrote {} pages", result.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Plan insertions without touching files
//!
//! ```
//! use pdftools::insert::{InsertionPlan, InsertionRequest};
//!
//! let requests = [InsertionRequest::new(0, 1), InsertionRequest::new(1, 3)];
//! let plan = InsertionPlan::new(&requests, 2, 3).unwrap();
//!
//! let mut pages = vec!["A", "B", "C"];
//! plan.apply(&mut pages, &["X", "Y"]).unwrap();
//! assert_eq!(pages, ["A", "X", "B", "C", "Y"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod insert;
pub mod io;
pub mod merge;
pub mod output;
pub mod pages;
pub mod raster;
pub mod split;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::{GlobalOptions, OverwriteMode};
pub use error::{PdfToolsError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
