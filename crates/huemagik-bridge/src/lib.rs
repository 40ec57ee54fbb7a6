// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HUEMAGIK: capability bridges.
//
// Defines the camera and file-picker traits, the exclusive camera lease, and
// the desktop implementation. Mobile hosts provide their own `PlatformBridge`.

pub mod desktop;
pub mod lease;
pub mod traits;

pub use desktop::DesktopBridge;
pub use lease::CameraLease;
pub use traits::{NativeCamera, NativeFilePicker, PlatformBridge, VideoStream};
