// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// huemagik-acquire: image in, palette state out.
//
// `Machine` is the pure state machine; `AcquisitionController` drives it from
// file submissions, camera captures and extraction responses, and publishes
// every transition on a watch channel.

pub mod controller;
pub mod machine;

pub use controller::AcquisitionController;
pub use machine::{Machine, Resolution, Ticket};
