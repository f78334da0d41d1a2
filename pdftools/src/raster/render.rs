//! Page rendering.
//!
//! [`PageRenderer`] is the seam between page selection and stitching on one
//! side and the PDF rasterizer on the other. [`HayroRenderer`] is the real
//! implementation.

use hayro::{InterpreterSettings, Pdf, RenderSettings, render};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{PdfToolsError, Result};

/// Something that can rasterize the pages of one document.
pub trait PageRenderer {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Render the zero-based page `index` at `scale` times 72 dpi.
    fn render_page(&self, index: usize, scale: f32) -> Result<RgbaImage>;
}

/// Renders pages with hayro.
pub struct HayroRenderer {
    pdf: Pdf,
    interpreter_settings: InterpreterSettings,
}

impl HayroRenderer {
    /// Parse `data` as a PDF. `path` is only used in error messages.
    pub fn new(data: Vec<u8>, path: &Path) -> Result<Self> {
        let pdf = Pdf::new(Arc::new(data))
            .map_err(|e| PdfToolsError::failed_to_load_pdf(path.to_path_buf(), format!("{e:?}")))?;

        Ok(Self {
            pdf,
            interpreter_settings: InterpreterSettings::default(),
        })
    }
}

impl PageRenderer for HayroRenderer {
    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<RgbaImage> {
        let pages = self.pdf.pages();
        let page = pages.get(index).ok_or_else(|| PdfToolsError::RenderFailed {
            page: index + 1,
            reason: format!("the document has {} page(s)", pages.len()),
        })?;

        let settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            ..Default::default()
        };
        let pixmap = render(page, &self.interpreter_settings, &settings);
        let (width, height) = (u32::from(pixmap.width()), u32::from(pixmap.height()));

        debug!(page = index + 1, width, height, "rendered page");

        // The page background is opaque white, so premultiplied and straight
        // alpha agree.
        RgbaImage::from_raw(width, height, pixmap.data_as_u8_slice().to_vec()).ok_or_else(|| {
            PdfToolsError::RenderFailed {
                page: index + 1,
                reason: format!("pixel buffer does not match {width}x{height}"),
            }
        })
    }
}
