// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! loudly at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Default language preference order for transcript retrieval.
pub const DEFAULT_LANGUAGES: [&str; 5] = ["pt-BR", "pt", "pt-BR_auto", "en", "en_auto"];

/// Top-level Flowpipe configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FlowpipeConfig {
    /// Logging settings for the binary.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chatflow prediction endpoint settings.
    #[serde(default)]
    pub chatflow: ChatflowConfig,

    /// Transcript tool settings.
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Chatflow prediction endpoint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatflowConfig {
    /// Full prediction endpoint URL, e.g. `https://flowise.example/api/v1/prediction/<id>`.
    #[serde(default)]
    pub prediction_url: String,

    /// Bearer token sent with every prediction request.
    #[serde(default)]
    pub api_key: String,

    /// Keep only the last N prior messages in `history`. Unset keeps all.
    #[serde(default)]
    pub max_history: Option<usize>,

    /// Map system messages that precede the current message into `history`
    /// as user messages. They always populate `systemMessage` regardless.
    ///
    /// `true` matches the Open WebUI Flowise function, which sends every
    /// prior message. The default `false` keeps `history` to user and
    /// assistant turns so the system prompt is not sent twice.
    #[serde(default)]
    pub system_in_history: bool,

    /// Identifier the host lists this pipe under.
    #[serde(default = "default_pipe_id")]
    pub pipe_id: String,

    /// Display name the host lists this pipe under.
    #[serde(default = "default_pipe_name")]
    pub pipe_name: String,
}

impl Default for ChatflowConfig {
    fn default() -> Self {
        Self {
            prediction_url: String::new(),
            api_key: String::new(),
            max_history: None,
            system_in_history: false,
            pipe_id: default_pipe_id(),
            pipe_name: default_pipe_name(),
        }
    }
}

impl ChatflowConfig {
    /// Copy with the API key replaced, for printing.
    pub fn redacted(&self) -> Self {
        let api_key = if self.api_key.is_empty() {
            String::new()
        } else {
            "********".to_string()
        };
        Self {
            api_key,
            ..self.clone()
        }
    }
}

fn default_pipe_id() -> String {
    "flowise_chat".to_string()
}

fn default_pipe_name() -> String {
    "Flowise AI Chat".to_string()
}

/// Transcript tool configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptConfig {
    /// Language tags tried in order; the first that yields a transcript wins.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Origin of the video watch pages.
    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            youtube_base_url: default_youtube_base_url(),
        }
    }
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

fn default_youtube_base_url() -> String {
    "https://www.youtube.com".to_string()
}
