// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Writes rendered exports to disk.

use std::path::{Path, PathBuf};

use huemagik_acquire::AcquisitionController;
use huemagik_core::error::Result;
use huemagik_core::types::ExportFormat;
use tracing::info;

/// Render each format from the controller and write it into `out_dir` under
/// its standard file name. Returns the written paths in order.
pub fn write_exports(
    controller: &AcquisitionController,
    formats: &[ExportFormat],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let bytes = controller.export(*format)?;
        let path = out_dir.join(format.file_name());
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), mime = format.mime_type(), "export written");
        written.push(path);
    }
    Ok(written)
}

/// Formats to write when none are requested.
pub fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Png, ExportFormat::Pdf]
}

/// Drop repeats while keeping the requested order.
pub fn dedup_formats(formats: Vec<ExportFormat>) -> Vec<ExportFormat> {
    let mut unique = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use huemagik_bridge::DesktopBridge;
    use huemagik_core::config::AppConfig;
    use huemagik_core::error::HuemagikError;

    use super::*;

    #[test]
    fn repeats_are_dropped_in_order() {
        let formats = dedup_formats(vec![
            ExportFormat::Pdf,
            ExportFormat::Png,
            ExportFormat::Pdf,
        ]);
        assert_eq!(formats, vec![ExportFormat::Pdf, ExportFormat::Png]);
    }

    #[test]
    fn nothing_is_written_before_a_palette_exists() {
        let controller =
            AcquisitionController::from_config(&AppConfig::default(), Arc::new(DesktopBridge))
                .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = write_exports(&controller, &default_formats(), dir.path());
        assert!(matches!(result, Err(HuemagikError::NotReady)));
        assert!(!dir.path().join("palette.png").exists());
    }
}
