//! Integration tests for page insertion.

use pdftools::config::{InsertConfig, OverwriteMode, PageList};
use pdftools::error::PdfToolsError;
use pdftools::insert::Inserter;
use rstest::rstest;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{create_pdf, labels_of};

fn insert_config(dir: &Path, pages: &str, locations: &str) -> InsertConfig {
    InsertConfig {
        target: dir.join("target.pdf"),
        source: dir.join("source.pdf"),
        destination: dir.join("result.pdf"),
        pages: PageList::parse(pages).unwrap(),
        locations: PageList::parse(locations).unwrap(),
        overwrite_mode: OverwriteMode::NoClobber,
    }
}

#[rstest]
#[case("1,2", "2,4", &["A", "X", "B", "C", "Y"])]
#[case("1", "1", &["X", "A", "B", "C"])]
#[case("2", "4", &["A", "B", "C", "Y"])]
#[case("2,1", "1,1", &["X", "Y", "A", "B", "C"])]
#[case("1,1", "1,4", &["X", "A", "B", "C", "X"])]
#[tokio::test]
async fn test_insert_positions(
    #[case] pages: &str,
    #[case] locations: &str,
    #[case] expected: &[&str],
) {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "target.pdf", &["A", "B", "C"]);
    create_pdf(dir.path(), "source.pdf", &["X", "Y"]);

    let config = insert_config(dir.path(), pages, locations);
    let result = Inserter::new().insert(&config).await.unwrap();

    assert_eq!(result.total_pages, expected.len());
    assert_eq!(labels_of(&config.destination), expected);
}

#[tokio::test]
async fn test_insert_does_not_modify_inputs() {
    let dir = TempDir::new().unwrap();
    let target = create_pdf(dir.path(), "target.pdf", &["A", "B"]);
    let source = create_pdf(dir.path(), "source.pdf", &["X"]);
    let target_bytes = std::fs::read(&target).unwrap();
    let source_bytes = std::fs::read(&source).unwrap();

    Inserter::new()
        .insert(&insert_config(dir.path(), "1", "2"))
        .await
        .unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), target_bytes);
    assert_eq!(std::fs::read(&source).unwrap(), source_bytes);
}

#[tokio::test]
async fn test_insert_mismatched_lengths_opens_nothing() {
    let dir = TempDir::new().unwrap();

    let result = Inserter::new()
        .insert(&insert_config(dir.path(), "1,2,3", "1,2"))
        .await;

    assert!(matches!(
        result,
        Err(PdfToolsError::MismatchedSelections {
            pages: 3,
            locations: 2
        })
    ));
    assert!(!dir.path().join("result.pdf").exists());
}

#[tokio::test]
async fn test_insert_page_beyond_source() {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "target.pdf", &["A"]);
    create_pdf(dir.path(), "source.pdf", &["X"]);

    let err = Inserter::new()
        .insert(&insert_config(dir.path(), "2", "1"))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert!(!dir.path().join("result.pdf").exists());
}

#[tokio::test]
async fn test_insert_location_past_the_output() {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "target.pdf", &["A", "B", "C"]);
    create_pdf(dir.path(), "source.pdf", &["X"]);

    let err = Inserter::new()
        .insert(&insert_config(dir.path(), "1", "6"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PdfToolsError::InvalidInsertPosition {
            position: 6,
            max_position: 4,
            ..
        }
    ));
    assert!(!dir.path().join("result.pdf").exists());
}
