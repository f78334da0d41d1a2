//! Integration tests for merging and splitting.

use pdftools::config::{MergeConfig, OverwriteMode, SplitConfig};
use pdftools::merge::{Merger, merge_pdfs};
use pdftools::split::split_pdf;
use pdftools::utils::collect_paths_for_patterns;
use tempfile::TempDir;

use crate::common::{create_pdf, labels_of, page_count_of};

#[tokio::test]
async fn test_merge_keeps_argument_order() {
    let dir = TempDir::new().unwrap();
    let first = create_pdf(dir.path(), "first.pdf", &["one", "two"]);
    let second = create_pdf(dir.path(), "second.pdf", &["three"]);
    let third = create_pdf(dir.path(), "third.pdf", &["four", "five"]);
    let output = dir.path().join("merged.pdf");

    let config = MergeConfig {
        inputs: vec![third, first, second],
        output: output.clone(),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    let (stats, write_stats) = Merger::new().merge_to_file(&config).await.unwrap();

    assert_eq!(stats.files_merged, 3);
    assert_eq!(stats.total_pages, 5);
    assert!(write_stats.file_size > 0);
    assert_eq!(
        labels_of(&output),
        vec!["four", "five", "one", "two", "three"]
    );
}

#[tokio::test]
async fn test_merge_pdfs_in_memory() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", &["a"]);
    let b = create_pdf(dir.path(), "b.pdf", &["b"]);

    let config = MergeConfig {
        inputs: vec![a, b],
        output: dir.path().join("unused.pdf"),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    let (doc, stats) = merge_pdfs(&config).await.unwrap();

    assert_eq!(doc.get_pages().len(), 2);
    assert_eq!(stats.files_merged, 2);
    assert!(!dir.path().join("unused.pdf").exists());
}

#[tokio::test]
async fn test_merge_with_glob_patterns() {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "part-2.pdf", &["second"]);
    create_pdf(dir.path(), "part-1.pdf", &["first"]);
    let pattern = dir.path().join("part-*.pdf").to_string_lossy().into_owned();

    let inputs = collect_paths_for_patterns(&[pattern]).unwrap();
    let output = dir.path().join("all.pdf");
    let config = MergeConfig {
        inputs,
        output: output.clone(),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    Merger::new().merge_to_file(&config).await.unwrap();

    assert_eq!(labels_of(&output), vec!["first", "second"]);
}

#[tokio::test]
async fn test_split_produces_one_file_per_page() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "report.pdf", &["intro", "body", "outro"]);
    let out_dir = dir.path().join("pages");

    let config = SplitConfig {
        input,
        out_dir: Some(out_dir.clone()),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    let result = split_pdf(&config).await.unwrap();

    assert_eq!(result.page_count, 3);
    for (number, label) in [(1, "intro"), (2, "body"), (3, "outro")] {
        let path = out_dir.join(format!("report-p{number}.pdf"));
        assert_eq!(labels_of(&path), vec![label]);
    }
}

#[tokio::test]
async fn test_merge_then_split_round_trip() {
    let dir = TempDir::new().unwrap();
    let left = create_pdf(dir.path(), "left.pdf", &["left"]);
    let right = create_pdf(dir.path(), "right.pdf", &["right"]);
    let merged = dir.path().join("both.pdf");

    let config = MergeConfig {
        inputs: vec![left, right],
        output: merged.clone(),
        overwrite_mode: OverwriteMode::NoClobber,
    };
    Merger::new().merge_to_file(&config).await.unwrap();
    assert_eq!(page_count_of(&merged), 2);

    let result = split_pdf(&SplitConfig {
        input: merged,
        out_dir: None,
        overwrite_mode: OverwriteMode::NoClobber,
    })
    .await
    .unwrap();

    assert_eq!(result.outputs.len(), 2);
    assert_eq!(labels_of(&result.outputs[0]), vec!["left"]);
    assert_eq!(labels_of(&result.outputs[1]), vec!["right"]);
    assert_eq!(page_count_of(&result.outputs[0]), 1);
    assert_eq!(page_count_of(&result.outputs[1]), 1);
}

#[tokio::test]
async fn test_split_force_overwrites_existing_pages() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "doc.pdf", &["fresh"]);
    std::fs::write(dir.path().join("doc-p1.pdf"), b"stale").unwrap();

    let config = SplitConfig {
        input,
        out_dir: None,
        overwrite_mode: OverwriteMode::Force,
    };
    split_pdf(&config).await.unwrap();

    assert_eq!(labels_of(&dir.path().join("doc-p1.pdf")), vec!["fresh"]);
}
