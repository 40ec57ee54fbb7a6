// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Acquisition state machine.
//
// Pure transitions over `AcquisitionState`, with no I/O. Every transition that
// could leave a request behind bumps the issued ticket, so a response only
// applies if its ticket is still the latest one.

use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::{AcquisitionState, Failure, Palette};
use tracing::debug;

/// Tag carried by one extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Whether a response changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer request, a capture or a clear came in first.
    Superseded,
}

/// Acquisition FSM.
#[derive(Debug, Default)]
pub struct Machine {
    state: AcquisitionState,
    issued: u64,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AcquisitionState {
        &self.state
    }

    /// The most recently issued ticket.
    pub fn latest(&self) -> Ticket {
        Ticket(self.issued)
    }

    fn bump(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Any state -> `Loading`, superseding whatever was in flight.
    pub fn begin_request(&mut self) -> Ticket {
        let ticket = self.bump();
        self.state = AcquisitionState::Loading;
        debug!(ticket = ticket.0, "request issued");
        ticket
    }

    /// Apply an extraction outcome if `ticket` is still current.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<Palette, Failure>,
    ) -> Resolution {
        if ticket != self.latest() || !self.state.is_loading() {
            return Resolution::Superseded;
        }
        self.state = match outcome {
            Ok(palette) => AcquisitionState::Ready(palette),
            Err(failure) => AcquisitionState::Failed(failure),
        };
        Resolution::Applied
    }

    /// Any state -> `Capturing`.
    pub fn begin_capture(&mut self) {
        self.bump();
        self.state = AcquisitionState::Capturing;
    }

    /// `capture_frame` is only valid while the camera is live.
    pub fn ensure_capturing(&self) -> Result<()> {
        match self.state {
            AcquisitionState::Capturing => Ok(()),
            ref other => Err(HuemagikError::InvalidTransition(format!(
                "capture_frame requires capturing, state is {}",
                other.name()
            ))),
        }
    }

    /// Any state -> `Failed`, without a request behind it (camera errors).
    pub fn fail(&mut self, failure: Failure) {
        self.bump();
        self.state = AcquisitionState::Failed(failure);
    }

    /// Any state -> `Idle`.
    pub fn reset(&mut self) {
        self.bump();
        self.state = AcquisitionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use huemagik_core::types::{ColorSample, ErrorKind};

    use super::*;

    fn palette(r: u8) -> Palette {
        Palette::new(vec![
            ColorSample::new(r, 0, 0),
            ColorSample::new(0, r, 0),
            ColorSample::new(0, 0, r),
        ])
    }

    fn failure(kind: ErrorKind) -> Failure {
        Failure {
            kind,
            status: None,
            message: "boom".into(),
        }
    }

    #[test]
    fn request_then_response_is_ready() {
        let mut machine = Machine::new();
        let ticket = machine.begin_request();
        assert!(machine.state().is_loading());
        assert_eq!(machine.resolve(ticket, Ok(palette(1))), Resolution::Applied);
        assert_eq!(machine.state().palette(), Some(&palette(1)));
    }

    #[test]
    fn later_request_wins() {
        let mut machine = Machine::new();
        let a = machine.begin_request();
        let b = machine.begin_request();
        assert!(a < b);

        assert_eq!(machine.resolve(b, Ok(palette(2))), Resolution::Applied);
        assert_eq!(machine.resolve(a, Ok(palette(1))), Resolution::Superseded);
        assert_eq!(machine.state().palette(), Some(&palette(2)));
    }

    #[test]
    fn clear_and_capture_invalidate_in_flight() {
        let mut machine = Machine::new();
        let ticket = machine.begin_request();
        machine.reset();
        assert_eq!(
            machine.resolve(ticket, Ok(palette(1))),
            Resolution::Superseded
        );
        assert_eq!(machine.state(), &AcquisitionState::Idle);

        let ticket = machine.begin_request();
        machine.begin_capture();
        assert_eq!(
            machine.resolve(ticket, Err(failure(ErrorKind::NetworkError))),
            Resolution::Superseded
        );
        assert_eq!(machine.state(), &AcquisitionState::Capturing);
    }

    #[test]
    fn duplicate_response_is_ignored() {
        let mut machine = Machine::new();
        let ticket = machine.begin_request();
        machine.resolve(ticket, Err(failure(ErrorKind::ServiceError)));
        assert_eq!(
            machine.resolve(ticket, Ok(palette(3))),
            Resolution::Superseded
        );
        assert!(machine.state().failure().is_some());
    }

    #[test]
    fn capture_frame_needs_capturing() {
        let mut machine = Machine::new();
        assert!(matches!(
            machine.ensure_capturing(),
            Err(HuemagikError::InvalidTransition(_))
        ));
        machine.begin_capture();
        assert!(machine.ensure_capturing().is_ok());
        machine.fail(failure(ErrorKind::PermissionError));
        assert!(machine.ensure_capturing().is_err());
    }
}
