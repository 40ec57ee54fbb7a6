// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: decoding source images for thumbnails and encoding the
// finished canvas.

use huemagik_core::error::HuemagikError;
use huemagik_core::types::ImageSource;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

/// Thin wrapper around one in-memory image.
///
/// Transformations consume `self` and return a new processor so calls chain:
///
/// ```ignore
/// let thumb = ImageProcessor::from_source(&source)?
///     .fit_within(1080, 520)
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, HuemagikError> {
        let img = image::load_from_memory(data).map_err(|err| {
            HuemagikError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Use the source's decoded pixels when it carries them, otherwise decode
    /// its bytes.
    pub fn from_source(source: &ImageSource) -> Result<Self, HuemagikError> {
        match source.decoded() {
            Some(decoded) => Ok(Self::from_dynamic(decoded.clone())),
            None => Self::from_bytes(source.bytes()),
        }
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Scale to the largest size that fits `max_width` x `max_height` with the
    /// aspect ratio preserved.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        let resized = self
            .image
            .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, HuemagikError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, HuemagikError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| HuemagikError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huemagik_core::types::ImageFormat as SourceFormat;

    #[test]
    fn fit_within_keeps_aspect() {
        let wide = DynamicImage::new_rgb8(400, 100);
        let fitted = ImageProcessor::from_dynamic(wide).fit_within(200, 200);
        assert_eq!((fitted.width(), fitted.height()), (200, 50));
    }

    #[test]
    fn png_round_trips_dimensions() {
        let png = ImageProcessor::from_dynamic(DynamicImage::new_rgb8(7, 3))
            .to_png_bytes()
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        let back = ImageProcessor::from_bytes(&png).unwrap();
        assert_eq!((back.width(), back.height()), (7, 3));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let source = ImageSource::new(b"not an image".to_vec(), SourceFormat::Jpeg);
        assert!(matches!(
            ImageProcessor::from_source(&source),
            Err(HuemagikError::ImageError(_))
        ));
    }

    #[test]
    fn decoded_pixels_win_over_bytes() {
        let source = ImageSource::new(b"not an image".to_vec(), SourceFormat::Png)
            .with_decoded(DynamicImage::new_rgb8(5, 4));
        let processor = ImageProcessor::from_source(&source).unwrap();
        assert_eq!((processor.width(), processor.height()), (5, 4));
    }
}
