// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./flowpipe.toml` > `~/.config/flowpipe/flowpipe.toml`
//! > `/etc/flowpipe/flowpipe.toml`, the legacy `FLOWISE_API_URL` /
//! `FLOWISE_API_KEY` variables, and `FLOWPIPE_` prefixed overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FlowpipeConfig;

/// Unprefixed variables kept for compatibility with existing deployments.
pub const LEGACY_ENV_KEYS: [(&str, &str); 2] = [
    ("FLOWISE_API_URL", "chatflow.prediction_url"),
    ("FLOWISE_API_KEY", "chatflow.api_key"),
];

/// Prefixed variables for string-typed keys.
///
/// `Env` parses values, so a key like `1234567890` or `true` would arrive as
/// a number or bool and fail extraction. These are read as plain strings.
pub const STRING_ENV_KEYS: [(&str, &str); 6] = [
    ("FLOWPIPE_LOGGING_LEVEL", "logging.level"),
    ("FLOWPIPE_CHATFLOW_PREDICTION_URL", "chatflow.prediction_url"),
    ("FLOWPIPE_CHATFLOW_API_KEY", "chatflow.api_key"),
    ("FLOWPIPE_CHATFLOW_PIPE_ID", "chatflow.pipe_id"),
    ("FLOWPIPE_CHATFLOW_PIPE_NAME", "chatflow.pipe_name"),
    ("FLOWPIPE_TRANSCRIPT_YOUTUBE_BASE_URL", "transcript.youtube_base_url"),
];

const ENV_PREFIX: &str = "FLOWPIPE_";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/flowpipe/flowpipe.toml`
/// 3. `~/.config/flowpipe/flowpipe.toml`
/// 4. `./flowpipe.toml`
/// 5. `FLOWISE_API_URL` / `FLOWISE_API_KEY`
/// 6. `FLOWPIPE_*` environment variables
pub fn load_config() -> Result<FlowpipeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<FlowpipeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FlowpipeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FlowpipeConfig, figment::Error> {
    let figment = Figment::new()
        .merge(Serialized::defaults(FlowpipeConfig::default()))
        .merge(Toml::file(path));
    merge_env(figment).extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(FlowpipeConfig::default()));
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    merge_env(figment)
}

/// Layers the legacy variables, then the `FLOWPIPE_` ones, over `figment`.
fn merge_env(figment: Figment) -> Figment {
    let figment = merge_verbatim(figment, &LEGACY_ENV_KEYS);
    merge_verbatim(figment.merge(env_provider()), &STRING_ENV_KEYS)
}

/// Merges each set variable in `keys` as a string at its key path.
fn merge_verbatim(figment: Figment, keys: &[(&str, &str)]) -> Figment {
    keys.iter()
        .fold(figment, |figment, (var, key)| match std::env::var(var) {
            Ok(value) => figment.merge(Serialized::default(key, value)),
            Err(_) => figment,
        })
}

/// Config file locations, lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/flowpipe/flowpipe.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("flowpipe/flowpipe.toml"));
    }
    paths.push(PathBuf::from("flowpipe.toml"));
    paths
}

/// `FLOWPIPE_` prefixed variables for the typed keys, mapped section-by-section.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `FLOWPIPE_CHATFLOW_MAX_HISTORY` must become
/// `chatflow.max_history`, not `chatflow.max.history`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter(|key| {
            !STRING_ENV_KEYS
                .iter()
                .any(|(var, _)| var[ENV_PREFIX.len()..].eq_ignore_ascii_case(key.as_str()))
        })
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("logging_", "logging.", 1)
                .replacen("chatflow_", "chatflow.", 1)
                .replacen("transcript_", "transcript.", 1)
                .into()
        })
}
