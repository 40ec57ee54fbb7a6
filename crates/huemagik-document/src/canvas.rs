// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offscreen raster canvas used by both card layouts.
//
// Fills are opaque; text is anti-aliased over what is already drawn. An optional clip mask is set when
// the canvas is created and applied to every pixel when the canvas is
// finished, so nothing drawn outside the mask survives.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::font::LabelFont;

const MASK_IN: Luma<u8> = Luma([255]);

/// Fixed-size drawing surface.
pub struct Canvas {
    image: RgbaImage,
    mask: Option<GrayImage>,
}

impl Canvas {
    /// Transparent canvas with no clipping.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            mask: None,
        }
    }

    /// Transparent canvas clipped to a rectangle with rounded corners.
    pub fn with_rounded_clip(width: u32, height: u32, radius: u32) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.mask = Some(rounded_rect_mask(width, height, radius));
        canvas
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fill an axis-aligned rectangle. Zero-sized rectangles are ignored and
    /// anything past the canvas edge is cut off.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        draw_filled_rect_mut(
            &mut self.image,
            Rect::at(x, y).of_size(width, height),
            color,
        );
    }

    /// Draw one line of text with the top of its line box at `y`.
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font: &LabelFont,
        size: f32,
        color: Rgba<u8>,
    ) {
        draw_text_mut(&mut self.image, color, x, y, size, font.face(), text);
    }

    /// Composite `picture` with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, x: i32, y: i32, picture: &DynamicImage) {
        let rgba = picture.to_rgba8();
        image::imageops::overlay(&mut self.image, &rgba, i64::from(x), i64::from(y));
    }

    /// Apply the clip mask and hand back the pixels.
    pub fn finish(self) -> RgbaImage {
        let Self { mut image, mask } = self;
        if let Some(mask) = mask {
            for (x, y, pixel) in image.enumerate_pixels_mut() {
                if *mask.get_pixel(x, y) != MASK_IN {
                    *pixel = Rgba([0, 0, 0, 0]);
                }
            }
        }
        image
    }

    /// Finish and composite onto white, for encoders without alpha.
    pub fn finish_opaque(self) -> RgbImage {
        flatten_onto_white(&self.finish())
    }
}

/// Blend every pixel over an opaque white backdrop.
pub fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let alpha = u32::from(a);
        let blend = |channel: u8| -> u8 {
            ((u32::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}

fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let radius = radius.min(width / 2).min(height / 2);
    if radius == 0 {
        if width > 0 && height > 0 {
            draw_filled_rect_mut(&mut mask, Rect::at(0, 0).of_size(width, height), MASK_IN);
        }
        return mask;
    }

    let r = radius as i32;
    let (w, h) = (width as i32, height as i32);
    // Cross of two rectangles, then a disc in each corner.
    if width > 2 * radius {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(r, 0).of_size(width - 2 * radius, height),
            MASK_IN,
        );
    }
    if height > 2 * radius {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(0, r).of_size(width, height - 2 * radius),
            MASK_IN,
        );
    }
    for center in [
        (r, r),
        (w - 1 - r, r),
        (r, h - 1 - r),
        (w - 1 - r, h - 1 - r),
    ] {
        draw_filled_circle_mut(&mut mask, center, r, MASK_IN);
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(5, 5, 20, 20, RED);
        canvas.fill_rect(0, 0, 0, 4, Rgba([0, 255, 0, 255]));
        let image = canvas.finish();
        assert_eq!(*image.get_pixel(9, 9), RED);
        assert_eq!(*image.get_pixel(4, 4), Rgba([0, 0, 0, 0]));
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn rounded_clip_removes_corners_only() {
        let mut canvas = Canvas::with_rounded_clip(100, 80, 20);
        canvas.fill_rect(0, 0, 100, 80, RED);
        let image = canvas.finish();
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(99, 79)[3], 0);
        assert_eq!(*image.get_pixel(50, 0), RED);
        assert_eq!(*image.get_pixel(0, 40), RED);
        assert_eq!(*image.get_pixel(50, 40), RED);
    }

    #[test]
    fn text_lands_inside_its_box() {
        let font = LabelFont::embedded().unwrap();
        let mut canvas = Canvas::new(120, 40);
        canvas.fill_rect(0, 0, 120, 40, Rgba([255, 255, 255, 255]));
        canvas.draw_text(10, 5, "#ab", &font, 20.0, RED);
        let image = canvas.finish();

        let width = font.text_width("#ab", 20.0);
        let bottom = 5 + font.line_height(20.0);
        let mut inked = 0;
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel[1] < 128 {
                inked += 1;
                assert!((9..=11 + width).contains(&x), "ink at column {x}");
                assert!((4..=bottom + 1).contains(&y), "ink at row {y}");
            }
        }
        assert!(inked > 20);
    }

    #[test]
    fn flatten_turns_transparency_white() {
        let mut canvas = Canvas::with_rounded_clip(30, 30, 10);
        canvas.fill_rect(0, 0, 30, 30, RED);
        let rgb = canvas.finish_opaque();
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*rgb.get_pixel(15, 15), Rgb([255, 0, 0]));
    }

    #[test]
    fn overlay_places_picture() {
        let mut canvas = Canvas::new(8, 8);
        let picture = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, RED));
        canvas.draw_image(3, 4, &picture);
        let image = canvas.finish();
        assert_eq!(*image.get_pixel(4, 5), RED);
        assert_eq!(image.get_pixel(5, 5)[3], 0);
    }
}
