// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in adapter catalog.
//!
//! Hardcoded manifests for the adapters compiled into Flowpipe.

use flowpipe_chatflow::{ADAPTER_NAME, PIPE_ID};
use flowpipe_core::types::AdapterType;
use flowpipe_transcript::{FUNCTION_NAME, TOOL_ID};

use crate::manifest::PluginManifest;

/// Returns manifests for all built-in adapters:
/// - flowise_chat (Pipe)
/// - youtube_transcript (Tool)
pub fn builtin_catalog() -> Vec<PluginManifest> {
    vec![
        PluginManifest {
            id: PIPE_ID.to_string(),
            name: ADAPTER_NAME.to_string(),
            version: "0.1.0".to_string(),
            description: "Relays conversations to a Flowise chatflow prediction endpoint"
                .to_string(),
            adapter_type: AdapterType::Pipe,
            function_name: None,
            capabilities: vec!["streaming".to_string(), "system_message".to_string()],
            config_keys: vec![
                "chatflow.prediction_url".to_string(),
                "chatflow.api_key".to_string(),
            ],
        },
        PluginManifest {
            id: TOOL_ID.to_string(),
            name: "YouTube Transcript".to_string(),
            version: "0.1.0".to_string(),
            description: "Retrieves YouTube video transcripts with language fallback".to_string(),
            adapter_type: AdapterType::Tool,
            function_name: Some(FUNCTION_NAME.to_string()),
            capabilities: vec![
                "status_events".to_string(),
                "language_fallback".to_string(),
            ],
            config_keys: vec![],
        },
    ]
}

/// Search the built-in catalog by query string.
///
/// Filters entries whose id, name or description contains the query
/// (case-insensitive). An empty query returns every entry.
pub fn search_catalog(query: &str) -> Vec<PluginManifest> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|m| {
            m.id.to_lowercase().contains(&query_lower)
                || m.name.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}
