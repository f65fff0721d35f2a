// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the chatflow prediction endpoint.
//!
//! One POST per call, bearer-token authentication, no retries and no
//! client-side timeout: a hanging upstream is the host's to cancel.

use flowpipe_config::ChatflowConfig;
use flowpipe_core::{FlowpipeError, TextStream};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::stream::relay_lines;
use crate::types::{text_field, ChatflowRequest};

/// Client bound to one prediction endpoint.
#[derive(Clone)]
pub struct ChatflowClient {
    client: reqwest::Client,
    prediction_url: String,
    api_key: String,
}

impl std::fmt::Debug for ChatflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatflowClient")
            .field("prediction_url", &self.prediction_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ChatflowClient {
    /// Creates a client for the endpoint and key in `config`.
    ///
    /// Missing values are not rejected here. Requests fail with a
    /// configuration error until the endpoint is set; an empty key is sent
    /// as is and left to the endpoint to refuse.
    pub fn new(config: &ChatflowConfig) -> Result<Self, FlowpipeError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FlowpipeError::transport("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            prediction_url: config.prediction_url.trim().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn prediction_url(&self) -> &str {
        &self.prediction_url
    }

    /// True when both endpoint and key are set.
    pub fn is_configured(&self) -> bool {
        !self.prediction_url.is_empty() && !self.api_key.is_empty()
    }

    /// Sends `request` and returns the `text` field of the JSON answer, or
    /// an empty string when the answer has none.
    pub async fn predict(&self, request: &ChatflowRequest) -> Result<String, FlowpipeError> {
        let response = self.send(request, false).await?;
        let body = response
            .text()
            .await
            .map_err(|e| FlowpipeError::transport("failed to read response body", e))?;
        debug!(bytes = body.len(), "prediction body received");

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| FlowpipeError::parse(format!("response is not JSON: {e}"), e))?;
        Ok(text_field(&value).unwrap_or_default())
    }

    /// Sends `request` asking for a streamed answer and returns the lazy
    /// sequence of text chunks.
    pub async fn predict_stream(
        &self,
        request: &ChatflowRequest,
    ) -> Result<TextStream, FlowpipeError> {
        let response = self.send(request, true).await?;
        Ok(relay_lines(response.bytes_stream()))
    }

    async fn send(
        &self,
        request: &ChatflowRequest,
        stream: bool,
    ) -> Result<reqwest::Response, FlowpipeError> {
        if self.prediction_url.is_empty() {
            return Err(FlowpipeError::Config(
                "chatflow.prediction_url is not set (FLOWISE_API_URL)".into(),
            ));
        }

        if let Ok(payload) = serde_json::to_string(request) {
            debug!(url = %self.prediction_url, stream, payload = %payload, "sending prediction request");
        }

        let accept = if stream {
            "text/event-stream, application/x-ndjson, */*"
        } else {
            "application/json"
        };

        let response = self
            .client
            .post(&self.prediction_url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, accept)
            .json(request)
            .send()
            .await
            .map_err(|e| FlowpipeError::transport(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, stream, "prediction response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(FlowpipeError::UpstreamHttp {
            status: status.as_u16(),
            body,
        })
    }
}
