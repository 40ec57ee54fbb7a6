// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export entry point: palette (+ optional source image) to PNG or PDF bytes.
//
// The raster is always composed first. PNG exports encode the swatch card;
// PDF exports embed the A4 palette sheet on a single page.

use huemagik_core::config::BrandConfig;
use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::{ExportFormat, ImageSource, Palette};
use image::DynamicImage;
use tracing::{info, instrument, warn};

use crate::card;
use crate::font::LabelFont;
use crate::image::ImageProcessor;
use crate::pdf::PdfWriter;

/// Renders exports with a fixed brand.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    brand: BrandConfig,
}

impl Renderer {
    pub fn new(brand: BrandConfig) -> Self {
        Self { brand }
    }

    pub fn brand(&self) -> &BrandConfig {
        &self.brand
    }

    /// Render `palette` in `format`. Output depends only on the arguments and
    /// the brand.
    #[instrument(skip(self, palette, source), fields(colors = palette.len(), format = ?format))]
    pub fn render(
        &self,
        palette: &Palette,
        source: Option<&ImageSource>,
        format: ExportFormat,
    ) -> Result<Vec<u8>> {
        if palette.is_empty() {
            return Err(HuemagikError::EmptyPalette);
        }

        let font = LabelFont::embedded()?;
        let bytes = match format {
            ExportFormat::Png => {
                let card = card::swatch_card(palette, &font);
                ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(card)).to_png_bytes()?
            }
            ExportFormat::Pdf => {
                let thumbnail = source.and_then(decode_thumbnail);
                let sheet = card::palette_sheet(palette, thumbnail.as_ref(), &self.brand, &font);
                let mut writer = PdfWriter::a4();
                writer.set_title(format!("{} palette", self.brand.wordmark));
                writer.embed_full_bleed(&sheet)?
            }
        };

        info!(bytes = bytes.len(), file = format.file_name(), "export rendered");
        Ok(bytes)
    }
}

/// Render with the default brand.
pub fn render(
    palette: &Palette,
    source: Option<&ImageSource>,
    format: ExportFormat,
) -> Result<Vec<u8>> {
    Renderer::default().render(palette, source, format)
}

fn decode_thumbnail(source: &ImageSource) -> Option<DynamicImage> {
    match ImageProcessor::from_source(source) {
        Ok(processor) => Some(processor.into_dynamic()),
        Err(err) => {
            warn!(error = %err, mime = source.mime_type(), "source image undecodable, thumbnail skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use huemagik_core::types::{ColorSample, ImageFormat};
    use image::Rgb;
    use lopdf::{Document, Object};

    use super::*;

    fn palette(n: usize) -> Palette {
        Palette::new(
            (0..n)
                .map(|i| ColorSample::new(30 * i as u8, 255 - 25 * i as u8, 128))
                .collect(),
        )
    }

    fn number(object: &Object) -> f32 {
        match object {
            Object::Integer(value) => *value as f32,
            Object::Real(value) => *value as f32,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    fn media_box(doc: &Document) -> Vec<f32> {
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let mut dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
        loop {
            if let Ok(media) = dict.get(b"MediaBox") {
                let media = match media {
                    Object::Reference(id) => doc.get_object(*id).unwrap(),
                    direct => direct,
                };
                return media.as_array().unwrap().iter().map(number).collect();
            }
            let parent = dict.get(b"Parent").unwrap().as_reference().unwrap();
            dict = doc.get_object(parent).unwrap().as_dict().unwrap();
        }
    }

    #[test]
    fn png_height_follows_palette_length() {
        for n in 3..=9 {
            let bytes = render(&palette(n), None, ExportFormat::Png).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!(decoded.width(), 600);
            assert_eq!(decoded.height(), n as u32 * 60 + 20);
        }
    }

    #[test]
    fn png_is_deterministic() {
        let palette = palette(5);
        let first = render(&palette, None, ExportFormat::Png).unwrap();
        let second = render(&palette, None, ExportFormat::Png).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn png_band_matches_hex() {
        let palette = Palette::new(vec![
            ColorSample::from_hex("#0c8f3a").unwrap(),
            ColorSample::from_hex("#ABCDEF").unwrap(),
            ColorSample::from_hex("#000000").unwrap(),
        ]);
        let bytes = render(&palette, None, ExportFormat::Png).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(*decoded.get_pixel(595, 5), Rgb([0x0c, 0x8f, 0x3a]));
        assert_eq!(*decoded.get_pixel(595, 65), Rgb([0xab, 0xcd, 0xef]));
    }

    #[test]
    fn empty_palette_is_rejected() {
        for format in [ExportFormat::Png, ExportFormat::Pdf] {
            assert!(matches!(
                render(&Palette::default(), None, format),
                Err(HuemagikError::EmptyPalette)
            ));
        }
    }

    #[test]
    fn pdf_is_one_a4_page() {
        let bytes = render(&palette(4), None, ExportFormat::Pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let media = media_box(&doc);
        assert_eq!(media.len(), 4);
        let width = media[2] - media[0];
        let height = media[3] - media[1];
        assert!((width - 595.3).abs() < 1.5, "width {width}");
        assert!((height - 841.9).abs() < 1.5, "height {height}");
    }

    #[test]
    fn undecodable_thumbnail_is_skipped() {
        let source = ImageSource::new(b"definitely not a jpeg".to_vec(), ImageFormat::Jpeg);
        let bytes = render(&palette(3), Some(&source), ExportFormat::Pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn decodable_thumbnail_is_embedded() {
        let frame = DynamicImage::new_rgb8(64, 48);
        let source = ImageSource::from_frame(frame).unwrap();
        let bytes = render(&palette(3), Some(&source), ExportFormat::Pdf).unwrap();
        assert_eq!(Document::load_mem(&bytes).unwrap().get_pages().len(), 1);
    }
}
