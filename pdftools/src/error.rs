//! Error types for pdftools.
//!
//! Every operation in the library reports failures through [`PdfToolsError`].
//! Messages are meant to be shown to the user as-is, so they carry the path
//! or argument that caused the problem and, where useful, a hint.
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed or mismatched arguments
//! - **Input Errors**: missing files, unreadable or encrypted PDFs
//! - **Output Errors**: destination collisions, write failures
//! - **Processing Errors**: rendering, image encoding, metadata tagging

use std::io;
use std::path::PathBuf;

/// Result type alias for pdftools operations.
pub type Result<T> = std::result::Result<T, PdfToolsError>;

/// Main error type for pdftools operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfToolsError {
    /// Arguments are malformed or inconsistent.
    #[error("Invalid arguments: {message}")]
    Validation {
        /// Description of what is wrong.
        message: String,
    },

    /// Page and location selections of `insert` have different lengths.
    #[error(
        "Page selection and location selection must have the same length \
         (got {pages} page(s) and {locations} location(s))"
    )]
    MismatchedSelections {
        /// Number of entries in the page selection.
        pages: usize,
        /// Number of entries in the location selection.
        locations: usize,
    },

    /// A page selection string could not be parsed.
    #[error("Invalid page selection '{selection}': {reason}")]
    InvalidPageSelection {
        /// The selection as given by the user.
        selection: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A page index lies outside the document.
    #[error(
        "Page {page} is out of range for {}\n  \
         The document has {total_pages} page(s)",
        path.display()
    )]
    InvalidPageRange {
        /// Document the page was requested from.
        path: PathBuf,
        /// Offending one-based page or position.
        page: usize,
        /// Number of pages in the document.
        total_pages: usize,
    },

    /// An insert location lies past the end of the composed document.
    #[error(
        "Insert location {position} is out of range for {}\n  \
         Locations run from 1 to {max_position} (target pages plus inserted pages)",
        path.display()
    )]
    InvalidInsertPosition {
        /// Document receiving the pages.
        path: PathBuf,
        /// Offending one-based location.
        position: usize,
        /// Highest accepted one-based location.
        max_position: usize,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// File could not be parsed as a PDF.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF loaded but its structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// No input files were given to an operation that needs some.
    #[error("No input files specified")]
    NoInputFiles,

    /// Destination already exists and overwriting was not requested.
    #[error(
        "Destination already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    DestinationExists {
        /// Path to the existing file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Requested image or document format is not supported.
    #[error("Unsupported format: '{format}'. Supported formats: {supported}")]
    UnsupportedFormat {
        /// The format as given.
        format: String,
        /// Comma-separated list of accepted formats.
        supported: String,
    },

    /// Rendering a page to a bitmap failed.
    #[error("Failed to render page {page}: {reason}")]
    RenderFailed {
        /// One-based page number.
        page: usize,
        /// Reason reported by the renderer.
        reason: String,
    },

    /// Composing or encoding the output image failed.
    #[error("Image processing failed: {0}")]
    ImageFailed(#[from] image::ImageError),

    /// Writing image metadata failed.
    #[error("Failed to write image metadata to {}\n  Reason: {reason}", path.display())]
    MetadataFailed {
        /// Image being tagged.
        path: PathBuf,
        /// Details about the failure.
        reason: String,
    },

    /// A document manipulation step failed.
    #[error("Operation failed: {reason}")]
    OperationFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for PdfToolsError {
    fn from(err: lopdf::Error) -> Self {
        Self::operation_failed(err.to_string())
    }
}

impl From<anyhow::Error> for PdfToolsError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(format!("{err:#}"))
    }
}

impl PdfToolsError {
    /// Create a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an InvalidPageSelection error.
    pub fn invalid_page_selection(selection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPageSelection {
            selection: selection.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create a DestinationExists error.
    pub fn destination_exists(path: PathBuf) -> Self {
        Self::DestinationExists { path }
    }

    /// Create an OperationFailed error.
    pub fn operation_failed(reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            reason: reason.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 1,
            Self::MismatchedSelections { .. } => 1,
            Self::InvalidPageSelection { .. } => 1,
            Self::InvalidPageRange { .. } => 1,
            Self::InvalidInsertPosition { .. } => 1,
            Self::NoInputFiles => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::DestinationExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io(_) => 5,
            Self::RenderFailed { .. } => 6,
            Self::ImageFailed(_) => 6,
            Self::MetadataFailed { .. } => 6,
            Self::OperationFailed { .. } => 6,
            Self::UnsupportedFormat { .. } => 7,
            Self::Other(_) => 1,
        }
    }
}
