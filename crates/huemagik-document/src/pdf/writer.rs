// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: embeds a finished raster full-bleed on a single page using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use huemagik_core::error::HuemagikError;
use image::RgbImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// A4 portrait, in millimetres.
pub const A4_MM: (f32, f32) = (210.0, 297.0);

const MM_PER_INCH: f32 = 25.4;

/// Creates single-page PDFs from raster images.
pub struct PdfWriter {
    /// Page size in millimetres.
    page_mm: (f32, f32),
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Writer for an A4 portrait page.
    pub fn a4() -> Self {
        Self {
            page_mm: A4_MM,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Page width and height in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        (Mm(self.page_mm.0), Mm(self.page_mm.1))
    }

    /// Place `canvas` so its width spans the page exactly, anchored at the
    /// bottom-left corner.
    #[instrument(skip(self, canvas), fields(width = canvas.width(), height = canvas.height()))]
    pub fn embed_full_bleed(&self, canvas: &RgbImage) -> Result<Vec<u8>, HuemagikError> {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Err(HuemagikError::PdfError("cannot embed an empty canvas".into()));
        }
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Palette");
        info!(title, "Creating palette PDF");

        let raw = RawImage {
            pixels: RawImageData::U8(canvas.as_raw().clone()),
            width: canvas.width() as usize,
            height: canvas.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        // Pixels per inch that make the canvas width equal the page width.
        let dpi = canvas.width() as f32 / (page_w.0 / MM_PER_INCH);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(dpi),
                rotate: None,
            },
        }];

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);
        debug!(dpi, "Canvas placed on page");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings while saving");
        }
        if output.is_empty() {
            return Err(HuemagikError::PdfError("printpdf produced no output".into()));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn writes_single_page_pdf() {
        let canvas = RgbImage::from_pixel(124, 175, Rgb([10, 20, 30]));
        let mut writer = PdfWriter::a4();
        writer.set_title("Test palette");
        let bytes = writer.embed_full_bleed(&canvas).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let canvas = RgbImage::new(0, 0);
        assert!(matches!(
            PdfWriter::a4().embed_full_bleed(&canvas),
            Err(HuemagikError::PdfError(_))
        ));
    }
}
