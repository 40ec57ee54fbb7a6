// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: image sources, color samples, palettes and the
// acquisition state observed by renderers and navigation.

use std::fmt;
use std::io::Cursor;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{HuemagikError, Result};

// ---------------------------------------------------------------------------
// Image sources
// ---------------------------------------------------------------------------

/// Image encodings accepted from the upload and camera capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// MIME type string sent as the multipart part content type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Canonical file extension, used for the multipart file name.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Resolve a format from a MIME type. Only `image/*` types we can
    /// thumbnail are accepted; parameters after `;` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/bmp" | "image/x-ms-bmp" => Some(Self::Bmp),
            "image/tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" | "jfif" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// An image handed over by a capability provider.
///
/// Holds the encoded bytes exactly as received plus, optionally, an already
/// decoded copy that the renderer may use for the thumbnail. The controller is
/// the only owner; the renderer borrows it.
pub struct ImageSource {
    bytes: Vec<u8>,
    format: ImageFormat,
    decoded: Option<DynamicImage>,
}

impl ImageSource {
    /// Wrap encoded bytes whose type is already known.
    pub fn new(bytes: Vec<u8>, format: ImageFormat) -> Self {
        Self {
            bytes,
            format,
            decoded: None,
        }
    }

    /// Wrap encoded bytes, validating the declared MIME type.
    ///
    /// The bytes themselves are not sniffed.
    pub fn from_mime(bytes: Vec<u8>, mime: &str) -> Result<Self> {
        let format = ImageFormat::from_mime(mime)
            .ok_or_else(|| HuemagikError::UnsupportedImage(mime.to_string()))?;
        Ok(Self::new(bytes, format))
    }

    /// Encode a captured frame as PNG, keeping the decoded pixels around for
    /// thumbnailing.
    pub fn from_frame(frame: DynamicImage) -> Result<Self> {
        let mut bytes = Vec::new();
        frame
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|err| HuemagikError::ImageError(format!("frame encoding failed: {err}")))?;
        Ok(Self {
            bytes,
            format: ImageFormat::Png,
            decoded: Some(frame),
        })
    }

    /// Attach a decoded copy of the image.
    pub fn with_decoded(mut self, decoded: DynamicImage) -> Self {
        self.decoded = Some(decoded);
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Decoded pixels, if the provider supplied them.
    pub fn decoded(&self) -> Option<&DynamicImage> {
        self.decoded.as_ref()
    }

    /// Short SHA-256 prefix of the encoded bytes, for log correlation only.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(&self.bytes);
        hex::encode(&hash[..6])
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSource")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .field("decoded", &self.decoded.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Colors and palettes
// ---------------------------------------------------------------------------

/// One extracted color, in the order the extraction service returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    /// Decimal channels joined by `", "`, e.g. `"12, 200, 45"`.
    pub fn rgb(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    /// Parse a `#rrggbb` string (either case) back into a sample.
    pub fn from_hex(code: &str) -> Option<Self> {
        let digits = code.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channels = hex::decode(digits).ok()?;
        Some(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Perceived brightness in `[0, 1]` (Rec. 709 weights on the encoded
    /// values).
    pub fn luminance(&self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Ordered list of representative colors for one image.
///
/// Immutable once built; a new extraction produces a new palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    samples: Vec<ColorSample>,
}

impl Palette {
    pub fn new(samples: Vec<ColorSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[ColorSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorSample> {
        self.samples.iter()
    }

    /// `hex()` projection of every sample, in order.
    pub fn hex_codes(&self) -> Vec<String> {
        self.samples.iter().map(ColorSample::hex).collect()
    }

    /// `rgb()` projection of every sample, in order.
    pub fn rgb_codes(&self) -> Vec<String> {
        self.samples.iter().map(ColorSample::rgb).collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorSample;
    type IntoIter = std::slice::Iter<'a, ColorSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ---------------------------------------------------------------------------
// Request configuration
// ---------------------------------------------------------------------------

/// Parameters sent with every extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    color_count: u8,
}

impl RequestConfig {
    pub const MIN_COLORS: u8 = 3;
    pub const MAX_COLORS: u8 = 9;

    pub fn new(color_count: u8) -> Result<Self> {
        if !(Self::MIN_COLORS..=Self::MAX_COLORS).contains(&color_count) {
            return Err(HuemagikError::Config(format!(
                "color count {color_count} outside {}..={}",
                Self::MIN_COLORS,
                Self::MAX_COLORS
            )));
        }
        Ok(Self { color_count })
    }

    pub fn color_count(&self) -> u8 {
        self.color_count
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { color_count: 5 }
    }
}

// ---------------------------------------------------------------------------
// Acquisition state
// ---------------------------------------------------------------------------

/// Error taxonomy for a failed acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No response reached us (connect failure, timeout, reset).
    NetworkError,
    /// The service answered with a non-success status.
    ServiceError,
    /// Success status but the body was not a usable color list.
    ProtocolError,
    /// Camera permission denied or no device.
    PermissionError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NetworkError => "network error",
            Self::ServiceError => "service error",
            Self::ProtocolError => "protocol error",
            Self::PermissionError => "permission error",
        };
        f.write_str(name)
    }
}

/// Terminal outcome of one failed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    /// HTTP status, for `ServiceError` only.
    pub status: Option<u16>,
    pub message: String,
}

/// Life cycle of "get an image, send it, receive colors".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AcquisitionState {
    #[default]
    Idle,
    Capturing,
    Loading,
    Ready(Palette),
    Failed(Failure),
}

impl AcquisitionState {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }

    pub fn palette(&self) -> Option<&Palette> {
        match self {
            Self::Ready(palette) => Some(palette),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Document encodings offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Simple swatch card, PNG.
    Png,
    /// Full A4 palette sheet, PDF.
    Pdf,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Png => "palette.png",
            Self::Pdf => "palette.pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = HuemagikError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            other => Err(HuemagikError::Config(format!("unknown export format '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(ColorSample::new(0, 10, 255).hex(), "#000aff");
        assert_eq!(ColorSample::new(171, 205, 239).hex(), "#abcdef");
    }

    #[test]
    fn hex_round_trips_every_channel_value() {
        for v in 0..=255u8 {
            for sample in [
                ColorSample::new(v, 0, 0),
                ColorSample::new(0, v, 0),
                ColorSample::new(0, 0, v),
                ColorSample::new(v, 255 - v, v / 2),
            ] {
                let code = sample.hex();
                assert_eq!(code.len(), 7);
                assert!(code.starts_with('#'));
                assert!(
                    code[1..]
                        .chars()
                        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
                );
                assert_eq!(ColorSample::from_hex(&code), Some(sample));
            }
        }
    }

    #[test]
    fn from_hex_rejects_malformed_codes() {
        assert_eq!(ColorSample::from_hex("ff0000"), None);
        assert_eq!(ColorSample::from_hex("#ff00"), None);
        assert_eq!(ColorSample::from_hex("#gg0000"), None);
        assert_eq!(ColorSample::from_hex("#FF0000"), Some(ColorSample::new(255, 0, 0)));
    }

    #[test]
    fn rgb_projection_uses_comma_space() {
        assert_eq!(ColorSample::new(12, 200, 45).rgb(), "12, 200, 45");
    }

    #[test]
    fn request_config_bounds() {
        assert!(RequestConfig::new(2).is_err());
        assert!(RequestConfig::new(10).is_err());
        assert_eq!(RequestConfig::new(3).unwrap().color_count(), 3);
        assert_eq!(RequestConfig::new(9).unwrap().color_count(), 9);
        assert_eq!(RequestConfig::default().color_count(), 5);
    }

    #[test]
    fn mime_validation_is_by_type_only() {
        let src = ImageSource::from_mime(b"not really a png".to_vec(), "image/png").unwrap();
        assert_eq!(src.format(), ImageFormat::Png);
        assert!(matches!(
            ImageSource::from_mime(vec![1, 2, 3], "application/pdf"),
            Err(HuemagikError::UnsupportedImage(_))
        ));
        assert_eq!(
            ImageFormat::from_mime("image/JPEG; charset=binary"),
            Some(ImageFormat::Jpeg)
        );
    }

    #[test]
    fn frame_is_encoded_as_png() {
        let frame = DynamicImage::new_rgb8(4, 3);
        let src = ImageSource::from_frame(frame).unwrap();
        assert_eq!(src.mime_type(), "image/png");
        assert!(src.decoded().is_some());
        assert_eq!(&src.bytes()[1..4], b"PNG");
        assert_eq!(src.digest().len(), 12);
    }

    #[test]
    fn state_accessors() {
        let palette = Palette::new(vec![ColorSample::new(1, 2, 3)]);
        let ready = AcquisitionState::Ready(palette.clone());
        assert_eq!(ready.palette(), Some(&palette));
        assert_eq!(ready.name(), "ready");
        assert!(AcquisitionState::Loading.is_loading());
        assert!(AcquisitionState::Idle.palette().is_none());
    }

    #[test]
    fn export_format_parsing() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap().file_name(), "palette.pdf");
        assert!("svg".parse::<ExportFormat>().is_err());
    }
}
