// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

/// Return the application data directory, creating it if needed.
///
/// Holds `config.json` and, unless `--out` says otherwise, the exports.
pub fn data_dir() -> PathBuf {
    let base = dirs_fallback();
    let dir = base.join("huemagik");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Default directory for `palette.png` / `palette.pdf`.
pub fn exports_dir() -> PathBuf {
    let dir = data_dir().join("exports");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}
