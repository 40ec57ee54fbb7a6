// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label typeface for swatch labels and branding.
//
// DejaVu Sans Mono is compiled into the binary, so exports never depend on
// the fonts installed on the host and identical inputs rasterize identically.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use huemagik_core::error::HuemagikError;
use imageproc::drawing::text_size;

static DEJAVU_SANS_MONO: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");

/// Parsed handle on the embedded typeface.
#[derive(Debug, Clone)]
pub struct LabelFont {
    face: FontRef<'static>,
}

impl LabelFont {
    pub fn embedded() -> Result<Self, HuemagikError> {
        let face = FontRef::try_from_slice(DEJAVU_SANS_MONO).map_err(|err| {
            HuemagikError::ImageError(format!("embedded label font unreadable: {}", err))
        })?;
        Ok(Self { face })
    }

    pub fn face(&self) -> &FontRef<'static> {
        &self.face
    }

    /// Advance width of `text` set at `size` pixels.
    pub fn text_width(&self, text: &str, size: f32) -> u32 {
        text_size(PxScale::from(size), &self.face, text).0
    }

    /// Ascender to descender at `size` pixels; the box a line of text
    /// occupies below its top edge.
    pub fn line_height(&self, size: f32) -> u32 {
        self.face.as_scaled(PxScale::from(size)).height().ceil() as u32
    }

    /// Largest size, capped at `max_size`, at which `text` is no wider than
    /// `max_width`.
    pub fn fit_size(&self, text: &str, max_width: u32, max_size: f32) -> f32 {
        const PROBE: f32 = 100.0;
        let width = self.text_width(text, PROBE);
        if width == 0 {
            return max_size;
        }
        let fitted = max_width as f32 * PROBE / (width + 1) as f32;
        fitted.min(max_size).floor().max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_face_parses() {
        let font = LabelFont::embedded().unwrap();
        assert!(font.face().glyph_id('#').0 != 0);
    }

    #[test]
    fn monospace_width_grows_with_length() {
        let font = LabelFont::embedded().unwrap();
        let one = font.text_width("0", 20.0);
        assert!(one > 0);
        let four = font.text_width("0000", 20.0);
        assert!(four >= 4 * one && four < 4 * (one + 1));
        assert!(font.text_width("#abcdef", 40.0) > font.text_width("#abcdef", 20.0));
    }

    #[test]
    fn line_height_covers_the_size() {
        let font = LabelFont::embedded().unwrap();
        assert!(font.line_height(20.0) >= 20);
        assert!(font.line_height(64.0) > font.line_height(28.0));
    }

    #[test]
    fn fit_size_respects_width_and_cap() {
        let font = LabelFont::embedded().unwrap();
        let widest = "RGB(255, 255, 255)";
        let size = font.fit_size(widest, 200, 40.0);
        assert!(size < 40.0);
        assert!(font.text_width(widest, size) <= 200);
        assert_eq!(font.fit_size("#abc", 1000, 28.0), 28.0);
    }
}
