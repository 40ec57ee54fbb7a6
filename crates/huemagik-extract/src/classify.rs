// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outcome classification for extraction attempts.
//
// Every failure is terminal for its attempt: there is no automatic retry, the
// user re-submits. This module only decides which bucket a failure lands in.

use huemagik_core::error::HuemagikError;
use huemagik_core::types::{ErrorKind, Failure};
use tracing::debug;

/// Classify a `HuemagikError` into the acquisition error taxonomy.
pub fn classify_error(err: &HuemagikError) -> ErrorKind {
    match err {
        // No response reached us
        HuemagikError::Network(_) => ErrorKind::NetworkError,
        HuemagikError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionError,
            _ => ErrorKind::NetworkError,
        },

        // Response with a non-success status
        HuemagikError::Service { .. } => ErrorKind::ServiceError,

        // Camera / capability problems
        HuemagikError::CameraPermission(_)
        | HuemagikError::PlatformUnavailable
        | HuemagikError::Bridge(_) => ErrorKind::PermissionError,

        // Everything else means we could not make sense of what came back
        HuemagikError::Protocol(_)
        | HuemagikError::Serialization(_)
        | HuemagikError::UnsupportedImage(_)
        | HuemagikError::InvalidTransition(_)
        | HuemagikError::NotReady
        | HuemagikError::EmptyPalette
        | HuemagikError::ImageError(_)
        | HuemagikError::PdfError(_)
        | HuemagikError::Config(_) => ErrorKind::ProtocolError,
    }
}

/// Turn an error into the `Failure` stored in `AcquisitionState::Failed`.
pub fn failure_from_error(err: &HuemagikError) -> Failure {
    let kind = classify_error(err);
    let (status, message) = match err {
        HuemagikError::Service { status, message } => (Some(*status), message.clone()),
        HuemagikError::CameraPermission(detail) => (None, detail.clone()),
        other => (None, other.to_string()),
    };
    debug!(?kind, ?status, "classified failure");
    Failure {
        kind,
        status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_is_network() {
        let err = HuemagikError::Network("connection refused".into());
        assert_eq!(classify_error(&err), ErrorKind::NetworkError);
    }

    #[test]
    fn status_failure_keeps_status_and_message() {
        let err = HuemagikError::Service {
            status: 500,
            message: "Failed to process image".into(),
        };
        let failure = failure_from_error(&err);
        assert_eq!(failure.kind, ErrorKind::ServiceError);
        assert_eq!(failure.status, Some(500));
        assert_eq!(failure.message, "Failed to process image");
    }

    #[test]
    fn malformed_payload_is_protocol() {
        let err = HuemagikError::Protocol("missing 'colors' field".into());
        assert_eq!(classify_error(&err), ErrorKind::ProtocolError);
    }

    #[test]
    fn camera_problems_are_permission() {
        assert_eq!(
            classify_error(&HuemagikError::CameraPermission("denied".into())),
            ErrorKind::PermissionError
        );
        assert_eq!(
            classify_error(&HuemagikError::PlatformUnavailable),
            ErrorKind::PermissionError
        );
    }
}
