// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for failed acquisitions and export problems.
//
// Every failure is terminal for its attempt; the suggestion tells the user
// what to do before trying again.

use crate::error::HuemagikError;
use crate::types::{ErrorKind, Failure};

/// A plain-English error with an actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether simply submitting again may succeed.
    pub retriable: bool,
}

/// Message for a `Failed` acquisition state.
pub fn humanize_failure(failure: &Failure) -> HumanError {
    match failure.kind {
        ErrorKind::NetworkError => HumanError {
            message: "We couldn't reach the palette service.".into(),
            suggestion: "Please check your connection, then upload the image again.".into(),
            retriable: true,
        },
        ErrorKind::ServiceError => {
            let status = failure
                .status
                .map(|code| format!(" (status {code})"))
                .unwrap_or_default();
            HumanError {
                message: format!("The palette service reported a problem{status}."),
                suggestion: format!(
                    "Try again in a moment, or try a different image. Server said: {}",
                    failure.message
                ),
                retriable: true,
            }
        }
        ErrorKind::ProtocolError => HumanError {
            message: "Invalid response from the palette service.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
        },
        ErrorKind::PermissionError => HumanError {
            message: "We can't use the camera.".into(),
            suggestion:
                "Please allow camera access for this app (or connect a camera), then try again."
                    .into(),
            retriable: false,
        },
    }
}

/// Message for errors that surface outside the acquisition state, such as
/// export or configuration problems.
pub fn humanize_error(err: &HuemagikError) -> HumanError {
    match err {
        HuemagikError::UnsupportedImage(mime) => HumanError {
            message: "This file isn't a supported image.".into(),
            suggestion: format!("Choose a PNG, JPEG, GIF, WebP, BMP or TIFF image. (Type: {mime})"),
            retriable: false,
        },
        HuemagikError::NotReady | HuemagikError::EmptyPalette => HumanError {
            message: "There is no palette to download yet.".into(),
            suggestion: "Upload an image and wait for its colors to appear.".into(),
            retriable: false,
        },
        HuemagikError::Config(detail) => HumanError {
            message: "The settings file has a problem.".into(),
            suggestion: format!("Fix the setting and start again. ({detail})"),
            retriable: false,
        },
        HuemagikError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
            retriable: false,
        },
        HuemagikError::CameraPermission(_) | HuemagikError::PlatformUnavailable => {
            humanize_failure(&Failure {
                kind: ErrorKind::PermissionError,
                status: None,
                message: err.to_string(),
            })
        }
        other => HumanError {
            message: "Something went wrong.".into(),
            suggestion: format!("Try again. If this keeps happening, please report it. ({other})"),
            retriable: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: ErrorKind, status: Option<u16>) -> Failure {
        Failure {
            kind,
            status,
            message: "boom".into(),
        }
    }

    #[test]
    fn network_failure_mentions_connection() {
        let human = humanize_failure(&failure(ErrorKind::NetworkError, None));
        assert!(human.suggestion.contains("check your connection"));
        assert!(human.retriable);
    }

    #[test]
    fn service_failure_surfaces_status_and_message() {
        let human = humanize_failure(&failure(ErrorKind::ServiceError, Some(500)));
        assert!(human.message.contains("500"));
        assert!(human.suggestion.contains("boom"));
    }

    #[test]
    fn protocol_failure_is_generic() {
        let human = humanize_failure(&failure(ErrorKind::ProtocolError, None));
        assert!(human.message.contains("Invalid response"));
        assert!(!human.suggestion.contains("boom"));
    }

    #[test]
    fn permission_failure_asks_for_access() {
        let human = humanize_failure(&failure(ErrorKind::PermissionError, None));
        assert!(human.suggestion.contains("allow camera access"));
        assert!(!human.retriable);
    }

    #[test]
    fn export_before_ready() {
        let human = humanize_error(&HuemagikError::NotReady);
        assert!(human.message.contains("no palette"));
    }
}
