// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop/CI bridge.
//
// Files are read straight from disk with the type taken from the extension;
// interactive picking goes through the native file dialog. There is no camera
// integration on desktop, so capture requests report the device as
// unavailable.

use std::path::Path;

use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::{ImageFormat, ImageSource};
use tracing::{info, warn};

use crate::traits::*;

/// Extensions offered by the image picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "jfif", "gif", "webp", "bmp", "tif", "tiff",
];

/// Bridge used on desktop and in CI.
pub struct DesktopBridge;

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeCamera for DesktopBridge {
    fn open_video_stream(&self) -> Result<Box<dyn VideoStream>> {
        warn!("NativeCamera::open_video_stream called on desktop bridge");
        Err(HuemagikError::PlatformUnavailable)
    }
}

impl NativeFilePicker for DesktopBridge {
    fn pick_image(&self) -> Result<Option<ImageSource>> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Choose an image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            info!("image picker cancelled");
            return Ok(None);
        };
        self.read_image(&path).map(Some)
    }

    fn read_image(&self, path: &Path) -> Result<ImageSource> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let format = ImageFormat::from_extension(ext).ok_or_else(|| {
            HuemagikError::UnsupportedImage(format!("{} (extension '{ext}')", path.display()))
        })?;
        let bytes = std::fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), mime = format.mime_type(), "image file loaded");
        Ok(ImageSource::new(bytes, format))
    }
}
