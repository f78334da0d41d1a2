//! Capture-time EXIF tags.

use chrono::NaiveDateTime;
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use std::path::Path;
use tracing::debug;

use crate::error::{PdfToolsError, Result};

/// EXIF date-time layout.
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Format a timestamp the way EXIF date tags store it.
pub fn format_exif_date(taken: &NaiveDateTime) -> String {
    taken.format(EXIF_DATE_FORMAT).to_string()
}

/// Set `DateTimeOriginal` and `CreateDate` of the image at `path` to `taken`.
pub fn write_capture_dates(path: &Path, taken: &NaiveDateTime) -> Result<()> {
    let stamp = format_exif_date(taken);

    let mut metadata = Metadata::new();
    metadata.set_tag(ExifTag::DateTimeOriginal(stamp.clone()));
    metadata.set_tag(ExifTag::CreateDate(stamp.clone()));

    metadata
        .write_to_file(path)
        .map_err(|e| PdfToolsError::MetadataFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(path = %path.display(), date = %stamp, "tagged capture date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::raster::stitch::encode_image;
    use chrono::NaiveDate;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(9, 8, 7)
            .unwrap()
    }

    #[test]
    fn test_format_exif_date() {
        assert_eq!(format_exif_date(&sample_date()), "2023:05:01 09:08:07");
    }

    #[test]
    fn test_write_capture_dates_to_jpeg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.jpg");
        let image = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        std::fs::write(&path, encode_image(image, OutputFormat::Jpeg).unwrap()).unwrap();

        write_capture_dates(&path, &sample_date()).unwrap();

        let metadata = Metadata::new_from_path(&path).unwrap();
        let tag = metadata
            .get_tag(&ExifTag::DateTimeOriginal(String::new()))
            .into_iter()
            .next()
            .cloned();
        match tag {
            Some(ExifTag::DateTimeOriginal(value)) => {
                assert_eq!(value.trim_end_matches('\0'), "2023:05:01 09:08:07");
            }
            other => panic!("unexpected tag: {other:?}"),
        }

        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_write_capture_dates_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = write_capture_dates(&dir.path().join("missing.jpg"), &sample_date());
        assert!(matches!(result, Err(PdfToolsError::MetadataFailed { .. })));
    }
}
