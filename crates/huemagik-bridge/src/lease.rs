// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Exclusive camera lease.
//
// Holding a `CameraLease` means holding the device. The stream's tracks are
// stopped exactly once: on `release()`, or on drop if nobody released it.

use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::ImageSource;
use tracing::{debug, info};

use crate::traits::{NativeCamera, VideoStream};

/// RAII guard over a live video stream.
pub struct CameraLease {
    stream: Option<Box<dyn VideoStream>>,
}

impl CameraLease {
    /// Open the camera and take the lease.
    pub fn acquire(camera: &dyn NativeCamera) -> Result<Self> {
        let stream = camera.open_video_stream()?;
        info!("camera lease acquired");
        Ok(Self {
            stream: Some(stream),
        })
    }

    /// Whether the stream is still running.
    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    /// Snapshot the current frame, then release the device whatever the
    /// outcome.
    pub fn capture(mut self) -> Result<ImageSource> {
        let frame = match self.stream.as_mut() {
            Some(stream) => stream.snapshot(),
            None => Err(HuemagikError::Bridge("camera stream already stopped".into())),
        };
        self.stop();
        frame
    }

    /// Stop the stream now.
    pub fn release(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all_tracks();
            debug!("camera tracks stopped");
        }
    }
}

impl Drop for CameraLease {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CameraLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraLease")
            .field("live", &self.is_live())
            .finish()
    }
}
