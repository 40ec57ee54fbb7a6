// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the image capabilities.
//
// The core only ever asks a capability for "an image byte source"; how the
// platform gets one (file dialog, camera API) stays behind these traits.

use std::path::Path;

use huemagik_core::error::Result;
use huemagik_core::types::ImageSource;

/// Unified bridge that groups the capabilities the acquisition flow uses.
pub trait PlatformBridge: NativeCamera + NativeFilePicker {
    /// Human-readable platform name (e.g. "Desktop", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Live camera access.
pub trait NativeCamera: Send + Sync {
    /// Request a video-only stream from the default camera.
    ///
    /// Returns `CameraPermission` if the user denied access and
    /// `PlatformUnavailable` if there is no device.
    fn open_video_stream(&self) -> Result<Box<dyn VideoStream>>;
}

/// A running camera stream. Owned by a [`crate::lease::CameraLease`].
pub trait VideoStream: Send {
    /// Grab the current frame as an image source.
    fn snapshot(&mut self) -> Result<ImageSource>;

    /// Stop every track of the stream and release the device.
    ///
    /// The lease guarantees this is called exactly once.
    fn stop_all_tracks(&mut self);
}

/// Pick image files from device storage.
pub trait NativeFilePicker: Send + Sync {
    /// Show a picker restricted to image types. `Ok(None)` if cancelled.
    fn pick_image(&self) -> Result<Option<ImageSource>>;

    /// Load an image the user already chose by path.
    fn read_image(&self, path: &Path) -> Result<ImageSource>;
}
