// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{HuemagikError, Result};
use crate::types::RequestConfig;

/// Config file name looked up in the working directory by default.
pub const CONFIG_FILE: &str = "config.json";

/// Static branding printed on exported documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Wordmark drawn top-left on the PDF sheet and in its footer.
    pub wordmark: String,
    /// Byline drawn next to the footer wordmark.
    pub byline: String,
}

impl BrandConfig {
    /// Longest wordmark, in characters, the sheet header is laid out for.
    pub const MAX_WORDMARK_CHARS: usize = 24;
    /// Longest byline, in characters, the sheet footer is laid out for.
    pub const MAX_BYLINE_CHARS: usize = 32;

    pub fn validate(&self) -> Result<()> {
        if self.wordmark.chars().count() > Self::MAX_WORDMARK_CHARS {
            return Err(HuemagikError::Config(format!(
                "brand wordmark longer than {} characters",
                Self::MAX_WORDMARK_CHARS
            )));
        }
        if self.byline.chars().count() > Self::MAX_BYLINE_CHARS {
            return Err(HuemagikError::Config(format!(
                "brand byline longer than {} characters",
                Self::MAX_BYLINE_CHARS
            )));
        }
        Ok(())
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            wordmark: "HUEMAGIK".into(),
            byline: "BY MAGIKMODS".into(),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the extraction service (`/process_image` is appended).
    pub endpoint: String,
    /// Number of colors requested per image (3–9).
    pub color_count: u8,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Branding for exported documents.
    pub brand: BrandConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://huemagik.us-west-2.elasticbeanstalk.com".into(),
            color_count: RequestConfig::default().color_count(),
            request_timeout_secs: 30,
            brand: BrandConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. A missing file yields the defaults; a present
    /// but unreadable or invalid one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %path.display(), endpoint = %config.endpoint, "config loaded");
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject settings the request pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(HuemagikError::Config("endpoint must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(HuemagikError::Config("request timeout must be positive".into()));
        }
        RequestConfig::new(self.color_count)?;
        self.brand.validate()
    }

    /// The per-request parameters derived from this config.
    pub fn request_config(&self) -> Result<RequestConfig> {
        RequestConfig::new(self.color_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.color_count, 5);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "endpoint": "http://localhost:5000", "color_count": 7 }"#)
            .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:5000");
        assert_eq!(config.color_count, 7);
        assert_eq!(config.brand.wordmark, "HUEMAGIK");
        assert_eq!(config.request_config().unwrap().color_count(), 7);
    }

    #[test]
    fn out_of_range_color_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "color_count": 12 }"#).unwrap();
        assert!(matches!(AppConfig::load(&path), Err(HuemagikError::Config(_))));
    }

    #[test]
    fn overlong_brand_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "brand": { "byline": "BY MAGIKMODS AND FRIENDS OF THE PALETTE COMMUNITY 2026" } }"#,
        )
        .unwrap();
        assert!(matches!(AppConfig::load(&path), Err(HuemagikError::Config(_))));

        let brand = BrandConfig {
            wordmark: "W".repeat(BrandConfig::MAX_WORDMARK_CHARS),
            byline: "B".repeat(BrandConfig::MAX_BYLINE_CHARS),
        };
        assert!(brand.validate().is_ok());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = AppConfig {
            color_count: 3,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }
}
