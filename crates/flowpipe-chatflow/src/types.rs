// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response types for the chatflow prediction API.
//!
//! Field names follow the prediction endpoint's camelCase schema.

use serde::{Deserialize, Serialize};

/// Body of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatflowRequest {
    /// Flattened text of the current message.
    pub question: String,
    /// Prior messages, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Content of the first system message, omitted when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
    /// Per-request flow overrides. Always sent, currently always empty.
    #[serde(default)]
    pub override_config: serde_json::Map<String, serde_json::Value>,
}

/// One prior message in the chatflow history schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

/// Author of a history entry, as the chatflow service names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryRole {
    UserMessage,
    ApiMessage,
}

/// Renders the `text` field of a response object.
///
/// Strings are returned verbatim, `null` becomes empty and any other JSON
/// value is returned as its JSON text.
pub fn text_field(value: &serde_json::Value) -> Option<String> {
    let text = value.as_object()?.get("text")?;
    Some(match text {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
