// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HUEMAGIK Extract: client for the remote color-extraction service, its wire
// format, and the classification of request outcomes into the acquisition
// error taxonomy.

pub mod classify;
pub mod client;
pub mod protocol;

pub use classify::{classify_error, failure_from_error};
pub use client::{ExtractionClient, ExtractionRequest, HttpExtractionClient};
