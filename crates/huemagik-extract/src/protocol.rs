// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire format of the extraction service.
//
//   POST {endpoint}/process_image   multipart: image=<binary>, colors=<int>
//   200  {"colors": [[r, g, b], ...]}
//   4xx/5xx {"error": "..."}

use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::{ColorSample, Palette};
use serde_json::Value;

/// Path appended to the configured endpoint.
pub const PROCESS_IMAGE_PATH: &str = "/process_image";

/// Multipart field carrying the image bytes.
pub const FIELD_IMAGE: &str = "image";

/// Multipart field carrying the requested color count.
pub const FIELD_COLORS: &str = "colors";

/// Longest service error text surfaced to the user.
const MAX_ERROR_TEXT: usize = 200;

/// Parse a success body into a palette of exactly `expected` colors.
///
/// Anything that is not a list of `[r, g, b]` integer triples in `0..=255`
/// is a protocol error. Sample order is preserved.
pub fn parse_palette(body: &[u8], expected: u8) -> Result<Palette> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| HuemagikError::Protocol(format!("body is not JSON: {err}")))?;

    let colors = value
        .get("colors")
        .ok_or_else(|| HuemagikError::Protocol("missing 'colors' field".into()))?
        .as_array()
        .ok_or_else(|| HuemagikError::Protocol("'colors' is not a list".into()))?;

    if colors.len() != expected as usize {
        return Err(HuemagikError::Protocol(format!(
            "expected {expected} colors, got {}",
            colors.len()
        )));
    }

    let samples = colors
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_triple(index, entry))
        .collect::<Result<Vec<_>>>()?;

    Ok(Palette::new(samples))
}

fn parse_triple(index: usize, entry: &Value) -> Result<ColorSample> {
    let channels = entry
        .as_array()
        .filter(|channels| channels.len() == 3)
        .ok_or_else(|| HuemagikError::Protocol(format!("color {index} is not an [r, g, b] triple")))?;

    let mut rgb = [0u8; 3];
    for (slot, channel) in rgb.iter_mut().zip(channels) {
        *slot = channel
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| {
                HuemagikError::Protocol(format!("color {index} has a channel outside 0..=255"))
            })?;
    }
    Ok(ColorSample::new(rgb[0], rgb[1], rgb[2]))
}

/// Extract the human-facing message from an error body.
///
/// Prefers the service's `{"error": "..."}` shape, falls back to the raw text.
pub fn service_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body)
        && let Some(message) = value.get("error").and_then(Value::as_str)
    {
        return message.to_string();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "no details".into();
    }
    text.chars().take(MAX_ERROR_TEXT).collect()
}
