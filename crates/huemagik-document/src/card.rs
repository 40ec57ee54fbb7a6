// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card layouts.
//
// `swatch_card` is the compact PNG export: one labelled band per color.
// `palette_sheet` is the A4 composition embedded in the PDF export: wordmark,
// optional thumbnail, three band stacks with different label policies, and a
// branded footer, all inside a rounded-corner clip.

use huemagik_core::config::BrandConfig;
use huemagik_core::cursor::LabelMode;
use huemagik_core::types::{ColorSample, Palette};
use image::{DynamicImage, Rgba, RgbImage};
use tracing::debug;

use crate::canvas::Canvas;
use crate::font::LabelFont;
use crate::image::ImageProcessor;

// -- Swatch card --------------------------------------------------------------

pub const SWATCH_CARD_WIDTH: u32 = 600;
pub const BAND_HEIGHT: u32 = 60;
pub const MARGIN: u32 = 20;

const SWATCH_LABEL_SIZE: f32 = 20.0;
const SWATCH_LABEL_PADDING: i32 = 12;
const SWATCH_MARGIN_FILL: Rgba<u8> = Rgba([0xf3, 0xf4, 0xf6, 0xff]);

// -- Palette sheet (A4 at 150 dpi) --------------------------------------------

pub const SHEET_WIDTH: u32 = 1240;
pub const SHEET_HEIGHT: u32 = 1754;

const SHEET_RADIUS: u32 = 48;
const SHEET_MARGIN: u32 = 80;
const SHEET_GAP: u32 = 40;
const SHEET_BACKGROUND: Rgba<u8> = Rgba([0x1f, 0x29, 0x37, 0xff]);
const SHEET_INK: Rgba<u8> = Rgba([0xf9, 0xfa, 0xfb, 0xff]);
const WORDMARK_SIZE: f32 = 64.0;
const FOOTER_SIZE: f32 = 28.0;
const THUMBNAIL_MAX_HEIGHT: u32 = 520;
const BLOCK_LABEL_MAX_SIZE: f32 = 28.0;
const BLOCK_LABEL_PADDING: u32 = 12;

/// Label policy of each sheet block, left to right.
const SHEET_BLOCKS: [LabelMode; 3] = [LabelMode::Blank, LabelMode::Hex, LabelMode::Rgb];

const DARK_INK: Rgba<u8> = Rgba([0x1a, 0x1a, 0x1a, 0xff]);
const LIGHT_INK: Rgba<u8> = Rgba([0xf5, 0xf5, 0xf5, 0xff]);

/// Height of the swatch card for `count` colors.
pub fn swatch_card_height(count: usize) -> u32 {
    count as u32 * BAND_HEIGHT + MARGIN
}

/// Band fill, taken from the sample's hex projection.
fn fill_for(sample: &ColorSample) -> Rgba<u8> {
    let parsed = ColorSample::from_hex(&sample.hex()).unwrap_or(*sample);
    Rgba([parsed.r, parsed.g, parsed.b, 0xff])
}

/// Near-black on light fills, near-white on dark ones.
pub fn ink_for(sample: &ColorSample) -> Rgba<u8> {
    if sample.luminance() > 0.5 {
        DARK_INK
    } else {
        LIGHT_INK
    }
}

/// Render the compact swatch card.
pub fn swatch_card(palette: &Palette, font: &LabelFont) -> RgbImage {
    let mut canvas = Canvas::new(SWATCH_CARD_WIDTH, swatch_card_height(palette.len()));
    let label_top = BAND_HEIGHT.saturating_sub(font.line_height(SWATCH_LABEL_SIZE)) / 2;

    for (index, sample) in palette.iter().enumerate() {
        let top = (index as u32 * BAND_HEIGHT) as i32;
        canvas.fill_rect(0, top, SWATCH_CARD_WIDTH, BAND_HEIGHT, fill_for(sample));
        let label = format!("{} - RGB({})", sample.hex(), sample.rgb());
        canvas.draw_text(
            SWATCH_LABEL_PADDING,
            top + label_top as i32,
            &label,
            font,
            SWATCH_LABEL_SIZE,
            ink_for(sample),
        );
    }

    let margin_top = (palette.len() as u32 * BAND_HEIGHT) as i32;
    canvas.fill_rect(0, margin_top, SWATCH_CARD_WIDTH, MARGIN, SWATCH_MARGIN_FILL);
    canvas.finish_opaque()
}

/// Render the A4 palette sheet.
pub fn palette_sheet(
    palette: &Palette,
    thumbnail: Option<&DynamicImage>,
    brand: &BrandConfig,
    font: &LabelFont,
) -> RgbImage {
    let mut canvas = Canvas::with_rounded_clip(SHEET_WIDTH, SHEET_HEIGHT, SHEET_RADIUS);
    canvas.fill_rect(0, 0, SHEET_WIDTH, SHEET_HEIGHT, SHEET_BACKGROUND);

    let content_width = SHEET_WIDTH - 2 * SHEET_MARGIN;
    let margin = SHEET_MARGIN as i32;

    let wordmark_size = font.fit_size(&brand.wordmark, content_width, WORDMARK_SIZE);
    canvas.draw_text(margin, margin, &brand.wordmark, font, wordmark_size, SHEET_INK);
    let mut cursor_y = SHEET_MARGIN + font.line_height(WORDMARK_SIZE) + SHEET_GAP;

    if let Some(picture) = thumbnail {
        let fitted = ImageProcessor::from_dynamic(picture.clone())
            .fit_within(content_width, THUMBNAIL_MAX_HEIGHT)
            .into_dynamic();
        debug!(
            width = fitted.width(),
            height = fitted.height(),
            "thumbnail placed"
        );
        canvas.draw_image(margin, cursor_y as i32, &fitted);
        cursor_y += fitted.height() + SHEET_GAP;
    }

    let footer_height = font.line_height(FOOTER_SIZE);
    let footer_y = SHEET_HEIGHT - SHEET_MARGIN - footer_height;
    let blocks_bottom = footer_y - SHEET_GAP;

    let block_count = SHEET_BLOCKS.len() as u32;
    let block_width = (content_width - (block_count - 1) * SHEET_GAP) / block_count;
    for (index, mode) in SHEET_BLOCKS.iter().enumerate() {
        let left = SHEET_MARGIN + index as u32 * (block_width + SHEET_GAP);
        draw_block(
            &mut canvas,
            font,
            palette,
            *mode,
            left,
            cursor_y,
            block_width,
            blocks_bottom.saturating_sub(cursor_y),
        );
    }

    // Footer: wordmark on the left, byline right-aligned in whatever room is
    // left. Either one shrinks rather than running off the sheet.
    let footer_wordmark_size = font.fit_size(&brand.wordmark, content_width / 2, FOOTER_SIZE);
    canvas.draw_text(
        margin,
        footer_y as i32,
        &brand.wordmark,
        font,
        footer_wordmark_size,
        SHEET_INK,
    );
    let right_edge = SHEET_WIDTH - SHEET_MARGIN;
    let byline_min_x =
        SHEET_MARGIN + font.text_width(&brand.wordmark, footer_wordmark_size) + SHEET_GAP;
    let byline_room = right_edge.saturating_sub(byline_min_x);
    let byline_size = font.fit_size(&brand.byline, byline_room, FOOTER_SIZE);
    let byline_x = right_edge
        .saturating_sub(font.text_width(&brand.byline, byline_size))
        .max(byline_min_x);
    canvas.draw_text(
        byline_x as i32,
        footer_y as i32,
        &brand.byline,
        font,
        byline_size,
        SHEET_INK,
    );

    canvas.finish_opaque()
}

/// One vertical band stack. Band edges are integer splits of the block height
/// so the stack fills it exactly.
fn draw_block(
    canvas: &mut Canvas,
    font: &LabelFont,
    palette: &Palette,
    mode: LabelMode,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
) {
    let count = palette.len() as u32;
    if count == 0 {
        return;
    }
    for (index, sample) in palette.iter().enumerate() {
        let index = index as u32;
        let band_top = top + index * height / count;
        let band_bottom = top + (index + 1) * height / count;
        let band_height = band_bottom - band_top;
        canvas.fill_rect(
            left as i32,
            band_top as i32,
            width,
            band_height,
            fill_for(sample),
        );

        let label = mode.label(sample);
        if label.is_empty() {
            continue;
        }
        let size = font.fit_size(
            &label,
            width.saturating_sub(2 * BLOCK_LABEL_PADDING),
            BLOCK_LABEL_MAX_SIZE,
        );
        let text_height = font.line_height(size);
        let label_y = band_top as i32 + (band_height as i32 - text_height as i32) / 2;
        canvas.draw_text(
            (left + BLOCK_LABEL_PADDING) as i32,
            label_y,
            &label,
            font,
            size,
            ink_for(sample),
        );
    }
}
