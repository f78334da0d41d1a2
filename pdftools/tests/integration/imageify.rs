//! Integration tests for rendering PDFs to images.

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use pdftools::config::{
    ImageifyConfig, OutputFormat, OverwriteMode, PageSelection, parse_date_taken,
};
use pdftools::error::PdfToolsError;
use pdftools::raster::imageify;
use rstest::rstest;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{PAGE_HEIGHT, create_pdf, page_width};

fn imageify_config(input: PathBuf, format: OutputFormat) -> ImageifyConfig {
    ImageifyConfig {
        input,
        output: None,
        page_selection: None,
        format,
        replace: false,
        date_taken: parse_date_taken("2024-02-29T18:30:05").unwrap(),
        dpi: 72.0,
        overwrite_mode: OverwriteMode::NoClobber,
    }
}

fn date_tag(metadata: &Metadata, tag: ExifTag) -> Option<String> {
    match metadata.get_tag(&tag).into_iter().next().cloned() {
        Some(ExifTag::DateTimeOriginal(value)) | Some(ExifTag::CreateDate(value)) => {
            Some(value.trim_end_matches('\0').to_string())
        }
        _ => None,
    }
}

#[tokio::test]
async fn test_pages_are_stacked_vertically() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "album.pdf", &["front", "back"]);

    let result = imageify(&imageify_config(input, OutputFormat::Png))
        .await
        .unwrap();

    let width = page_width(1) as u32;
    let height = 2 * PAGE_HEIGHT as u32;
    assert_eq!(result.dimensions, (width, height));

    let decoded = image::open(&result.output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (width, height));
}

#[tokio::test]
async fn test_page_selection_limits_rendered_pages() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "stack.pdf", &["a", "b", "c", "d"]);

    let mut config = imageify_config(input, OutputFormat::Png);
    config.page_selection = Some(PageSelection::parse("1,3").unwrap());
    let result = imageify(&config).await.unwrap();

    assert_eq!(result.pages, vec![0, 2]);
    assert_eq!(
        result.dimensions,
        (page_width(2) as u32, 2 * PAGE_HEIGHT as u32)
    );
}

#[tokio::test]
async fn test_jpeg_carries_capture_dates() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "receipt.pdf", &["total"]);

    let result = imageify(&imageify_config(input.clone(), OutputFormat::Jpeg))
        .await
        .unwrap();
    assert_eq!(result.output, dir.path().join("receipt.jpg"));
    assert!(input.exists());

    let metadata = Metadata::new_from_path(&result.output).unwrap();
    assert_eq!(
        date_tag(&metadata, ExifTag::DateTimeOriginal(String::new())).as_deref(),
        Some("2024:02:29 18:30:05")
    );
    assert_eq!(
        date_tag(&metadata, ExifTag::CreateDate(String::new())).as_deref(),
        Some("2024:02:29 18:30:05")
    );
}

#[rstest]
#[case(OutputFormat::Png, "png")]
#[case(OutputFormat::Tiff, "tiff")]
#[case(OutputFormat::WebP, "webp")]
#[tokio::test]
async fn test_output_extension_follows_format(
    #[case] format: OutputFormat,
    #[case] extension: &str,
) {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "page.pdf", &["only"]);

    let result = imageify(&imageify_config(input, format)).await.unwrap();

    assert_eq!(result.output.extension().unwrap(), extension);
    assert!(image::open(&result.output).is_ok());
}

#[tokio::test]
async fn test_replace_removes_pdf_after_success() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "scan.pdf", &["page"]);
    let output = dir.path().join("custom.png");

    let mut config = imageify_config(input.clone(), OutputFormat::Png);
    config.output = Some(output.clone());
    config.replace = true;
    let result = imageify(&config).await.unwrap();

    assert!(result.replaced);
    assert_eq!(result.output, output);
    assert!(output.exists());
    assert!(!input.exists());
}

#[rstest]
#[case("2-9")]
#[case("1-18446744073709551615")]
#[tokio::test]
async fn test_selection_past_the_end_is_rejected(#[case] selection: &str) {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "short.pdf", &["a", "b", "c"]);

    let mut config = imageify_config(input.clone(), OutputFormat::Png);
    config.page_selection = Some(PageSelection::parse(selection).unwrap());
    config.replace = true;
    let err = imageify(&config).await.unwrap_err();

    assert!(matches!(
        err,
        PdfToolsError::InvalidPageRange { total_pages: 3, .. }
    ));
    assert!(input.exists());
    assert!(!dir.path().join("short.png").exists());
}
