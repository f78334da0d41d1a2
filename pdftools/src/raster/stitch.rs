//! Vertical stitching and encoding of page images.

use image::{DynamicImage, Rgba, RgbaImage, imageops};
use std::io::Cursor;

use crate::config::OutputFormat;
use crate::error::{PdfToolsError, Result};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Stack `pages` top to bottom, left-aligned, on a white canvas.
///
/// The canvas is as wide as the widest page and as tall as all pages
/// together.
pub fn stitch_vertical(pages: &[RgbaImage]) -> Result<RgbaImage> {
    if pages.is_empty() {
        return Err(PdfToolsError::operation_failed("No pages to stitch"));
    }

    let width = pages.iter().map(RgbaImage::width).max().unwrap_or(0);
    let height = pages
        .iter()
        .try_fold(0u32, |acc, page| acc.checked_add(page.height()))
        .ok_or_else(|| PdfToolsError::operation_failed("Stitched image is too tall"))?;

    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    let mut y = 0i64;
    for page in pages {
        imageops::overlay(&mut canvas, page, 0, y);
        y += i64::from(page.height());
    }

    Ok(canvas)
}

/// Encode `image` in `format`. JPEG drops the alpha channel.
pub fn encode_image(image: RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let image = DynamicImage::ImageRgba8(image);
    let image = if format.supports_alpha() {
        image
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };

    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format.image_format())?;
    Ok(buf)
}
