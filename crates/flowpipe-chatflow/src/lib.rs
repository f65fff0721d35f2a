// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chatflow pipe for the Flowpipe host adapters.
//!
//! This crate implements [`PipeAdapter`] on top of a Flowise-style prediction
//! endpoint: the host conversation is reshaped into `question` + `history`,
//! posted once, and the answer is relayed either whole or line by line.

pub mod client;
pub mod request;
pub mod stream;
pub mod types;

use async_trait::async_trait;
use flowpipe_config::ChatflowConfig;
use flowpipe_core::{
    AdapterType, Conversation, FlowpipeError, HealthStatus, PipeAdapter, PipeDescriptor,
    PipeOutput, PipeRequest, PluginAdapter,
};
use tracing::{error, info, warn};

use crate::client::ChatflowClient;
use crate::request::{build_request, HistoryOptions};

/// Identifier the pipe is registered under.
pub const PIPE_ID: &str = "flowise_chat";

/// Display name of the adapter itself.
pub const ADAPTER_NAME: &str = "Flowise AI Chatflow";

/// Prefix of every error the pipe hands back to the host in place of an answer.
pub const ERROR_PREFIX: &str = "Error in Flowise pipe:";

/// Renders an error the way the host shows it to the chat user.
pub fn error_text(err: &FlowpipeError) -> String {
    format!("{ERROR_PREFIX} {err}")
}

/// True when `text` is an error rendered by [`error_text`], such as the
/// final chunk of an interrupted stream.
pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}

/// Chat pipe backed by a chatflow prediction endpoint.
#[derive(Debug, Clone)]
pub struct ChatflowPipe {
    client: ChatflowClient,
    options: HistoryOptions,
    pipe: PipeDescriptor,
}

impl ChatflowPipe {
    /// Creates the pipe from its configuration section.
    ///
    /// A missing endpoint or key only logs a warning; the pipe still
    /// registers and answers with an error message until configured.
    pub fn new(config: &ChatflowConfig) -> Result<Self, FlowpipeError> {
        if config.prediction_url.trim().is_empty() {
            warn!("chatflow prediction URL is not set; set chatflow.prediction_url or FLOWISE_API_URL");
        }
        if config.api_key.is_empty() {
            warn!("chatflow API key is not set; set chatflow.api_key or FLOWISE_API_KEY");
        }

        let client = ChatflowClient::new(config)?;
        info!(url = %client.prediction_url(), pipe = %config.pipe_id, "chatflow pipe initialized");

        Ok(Self {
            client,
            options: HistoryOptions::from(config),
            pipe: PipeDescriptor {
                id: config.pipe_id.clone(),
                name: config.pipe_name.clone(),
            },
        })
    }

    /// Answers `conversation`, streamed or whole.
    ///
    /// Never fails: any error becomes [`PipeOutput::Error`].
    pub async fn handle(&self, conversation: &Conversation, stream: bool) -> PipeOutput {
        match self.try_handle(conversation, stream).await {
            Ok(output) => output,
            Err(e) => {
                error!(error = %e, "chatflow pipe failed");
                PipeOutput::Error(error_text(&e))
            }
        }
    }

    async fn try_handle(
        &self,
        conversation: &Conversation,
        stream: bool,
    ) -> Result<PipeOutput, FlowpipeError> {
        let request = build_request(conversation, &self.options)?;
        if stream {
            Ok(PipeOutput::Stream(self.client.predict_stream(&request).await?))
        } else {
            Ok(PipeOutput::Text(self.client.predict(&request).await?))
        }
    }
}

#[async_trait]
impl PluginAdapter for ChatflowPipe {
    fn id(&self) -> &str {
        PIPE_ID
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Pipe
    }

    async fn health_check(&self) -> Result<HealthStatus, FlowpipeError> {
        // No network call: a prediction would run the flow and cost tokens.
        if self.client.is_configured() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "chatflow prediction URL or API key is not set".into(),
            ))
        }
    }
}

#[async_trait]
impl PipeAdapter for ChatflowPipe {
    fn pipes(&self) -> Vec<PipeDescriptor> {
        vec![self.pipe.clone()]
    }

    async fn pipe(&self, request: PipeRequest) -> PipeOutput {
        self.handle(&request.messages, request.stream).await
    }
}
