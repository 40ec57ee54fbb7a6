// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for HUEMAGIK.

use thiserror::Error;

/// Top-level error type for all HUEMAGIK operations.
#[derive(Debug, Error)]
pub enum HuemagikError {
    // -- Extraction service --
    #[error("network request failed: {0}")]
    Network(String),

    #[error("extraction service returned status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("invalid response from extraction service: {0}")]
    Protocol(String),

    // -- Capabilities --
    #[error("camera unavailable: {0}")]
    CameraPermission(String),

    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),

    // -- Controller --
    #[error("operation not valid in the current state: {0}")]
    InvalidTransition(String),

    #[error("no palette is ready for export")]
    NotReady,

    // -- Rendering --
    #[error("cannot render an empty palette")]
    EmptyPalette,

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HuemagikError>;
