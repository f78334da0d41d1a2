//! Integration tests for error handling and edge cases.

use pdftools::config::{MergeConfig, OverwriteMode, PageSelection, SplitConfig};
use pdftools::error::PdfToolsError;
use pdftools::merge::Merger;
use pdftools::split::split_pdf;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{create_pdf, labels_of};

#[tokio::test]
async fn test_error_empty_input_list() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.pdf");

    let config = MergeConfig {
        inputs: vec![],
        output: output.clone(),
        overwrite_mode: OverwriteMode::Force,
    };
    let err = Merger::new().merge_to_file(&config).await.unwrap_err();

    assert!(matches!(err, PdfToolsError::NoInputFiles));
    assert_eq!(err.exit_code(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_error_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.pdf");

    let config = MergeConfig {
        inputs: vec![PathBuf::from("/nonexistent/file.pdf")],
        output: output.clone(),
        overwrite_mode: OverwriteMode::Force,
    };
    let err = Merger::new().merge_to_file(&config).await.unwrap_err();

    assert!(matches!(err, PdfToolsError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_error_invalid_pdf() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.pdf");
    std::fs::write(&bogus, b"%PDF-1.7\nnot really a pdf").unwrap();
    let good = create_pdf(dir.path(), "good.pdf", &["g"]);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig {
        inputs: vec![good, bogus],
        output: output.clone(),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    let err = Merger::new().merge_to_file(&config).await.unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_error_output_exists_without_force() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "in.pdf", &["new"]);
    let output = create_pdf(dir.path(), "out.pdf", &["old"]);

    let config = MergeConfig {
        inputs: vec![input],
        output: output.clone(),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    let err = Merger::new().merge_to_file(&config).await.unwrap_err();

    assert!(matches!(err, PdfToolsError::DestinationExists { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(labels_of(&output), vec!["old"]);
}

#[test]
fn test_error_output_is_input() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "same.pdf", &["x"]);

    let config = MergeConfig {
        inputs: vec![input.clone()],
        output: input,
        overwrite_mode: OverwriteMode::Force,
    };

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_split_refuses_to_clobber_any_page() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "doc.pdf", &["one", "two"]);
    std::fs::write(dir.path().join("doc-p2.pdf"), b"keep me").unwrap();

    let config = SplitConfig {
        input,
        out_dir: None,
        overwrite_mode: OverwriteMode::NoClobber,
    };
    let err = split_pdf(&config).await.unwrap_err();

    assert!(matches!(err, PdfToolsError::DestinationExists { .. }));
    assert!(!dir.path().join("doc-p1.pdf").exists());
    assert_eq!(std::fs::read(dir.path().join("doc-p2.pdf")).unwrap(), b"keep me");
}

#[test]
fn test_invalid_page_selections() {
    for selection in ["", "0", "3-1", "a-b", "1,,2", "-4"] {
        assert!(
            PageSelection::parse(selection).is_err(),
            "'{selection}' should be rejected"
        );
    }
}
