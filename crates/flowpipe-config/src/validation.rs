// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Most findings are warnings: an adapter with a missing endpoint or key can
//! still be registered with the host, it just answers with an error until
//! configured. Only values that would break the binary itself are errors.

use std::fmt;

use crate::diagnostic::ConfigError;
use crate::model::FlowpipeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A non-fatal configuration finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Validate a deserialized configuration.
///
/// Returns the collected warnings, or every hard error found (does not fail
/// fast).
pub fn validate_config(config: &FlowpipeConfig) -> Result<Vec<ConfigWarning>, Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(collect_warnings(config))
    } else {
        Err(errors)
    }
}

/// Findings that leave the adapters registrable but not fully usable.
pub fn collect_warnings(config: &FlowpipeConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let chatflow = &config.chatflow;

    if chatflow.prediction_url.trim().is_empty() {
        warnings.push(ConfigWarning {
            key: "chatflow.prediction_url",
            message: "not set; set it in flowpipe.toml or via FLOWISE_API_URL".to_string(),
        });
    } else if !is_http_url(&chatflow.prediction_url) {
        warnings.push(ConfigWarning {
            key: "chatflow.prediction_url",
            message: format!(
                "`{}` does not start with http:// or https://",
                chatflow.prediction_url
            ),
        });
    }

    if chatflow.api_key.trim().is_empty() {
        warnings.push(ConfigWarning {
            key: "chatflow.api_key",
            message: "not set; set it in flowpipe.toml or via FLOWISE_API_KEY".to_string(),
        });
    }

    if chatflow.max_history == Some(0) {
        warnings.push(ConfigWarning {
            key: "chatflow.max_history",
            message: "is 0; every request will be sent without history".to_string(),
        });
    }

    if config.transcript.languages.is_empty() {
        warnings.push(ConfigWarning {
            key: "transcript.languages",
            message: "is empty; no transcript can ever be retrieved".to_string(),
        });
    }

    if !is_http_url(&config.transcript.youtube_base_url) {
        warnings.push(ConfigWarning {
            key: "transcript.youtube_base_url",
            message: format!(
                "`{}` does not start with http:// or https://",
                config.transcript.youtube_base_url
            ),
        });
    }

    warnings
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
