// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async HTTP client for the remote color-extraction service.
//
// The service is a black box: it receives the image bytes and a color count
// and returns an ordered list of RGB triples. This client only transports the
// request and sorts the response into palette / network / service / protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info, instrument};

use huemagik_core::config::AppConfig;
use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::{ImageFormat, Palette, RequestConfig};

use crate::protocol::{self, FIELD_COLORS, FIELD_IMAGE, PROCESS_IMAGE_PATH};

/// One extraction request: a copy of the image bytes plus parameters.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub config: RequestConfig,
}

/// Anything that can turn image bytes into a palette.
///
/// Errors must already be one of `Network`, `Service` or `Protocol` so the
/// controller can classify them.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    async fn extract(&self, request: ExtractionRequest) -> Result<Palette>;
}

/// `reqwest`-backed client for `POST {endpoint}/process_image`.
pub struct HttpExtractionClient {
    client: reqwest::Client,
    url: String,
}

impl HttpExtractionClient {
    /// Build a client for the given service base URL.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let base = endpoint.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(HuemagikError::Config("extraction endpoint is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HuemagikError::Config(format!("HTTP client setup failed: {e}")))?;
        Ok(Self {
            client,
            url: format!("{base}{PROCESS_IMAGE_PATH}"),
        })
    }

    /// Build a client from the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.endpoint,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// The full `/process_image` URL this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExtractionClient for HttpExtractionClient {
    #[instrument(skip(self, request), fields(url = %self.url, bytes = request.bytes.len(), colors = request.config.color_count()))]
    async fn extract(&self, request: ExtractionRequest) -> Result<Palette> {
        let expected = request.config.color_count();
        let part = Part::bytes(request.bytes)
            .file_name(format!("image.{}", request.format.extension()))
            .mime_str(request.format.mime_type())
            .map_err(|e| HuemagikError::Protocol(format!("invalid part type: {e}")))?;
        let form = Form::new()
            .part(FIELD_IMAGE, part)
            .text(FIELD_COLORS, expected.to_string());

        debug!("sending extraction request");
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| HuemagikError::Network(format!("POST {}: {e}", self.url)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| HuemagikError::Network(format!("reading response body: {e}")))?;

        if !status.is_success() {
            let message = protocol::service_message(&body);
            error!(status = status.as_u16(), %message, "extraction service rejected request");
            return Err(HuemagikError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let palette = protocol::parse_palette(&body, expected)?;
        info!(colors = palette.len(), "palette received");
        Ok(palette)
    }
}
