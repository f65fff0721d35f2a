// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reshapes a host conversation into a chatflow prediction request.

use flowpipe_config::ChatflowConfig;
use flowpipe_core::{Conversation, FlowpipeError, Message, Role};

use crate::types::{ChatflowRequest, HistoryEntry, HistoryRole};

/// Knobs that change how prior messages become `history`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Keep only the last N prior messages.
    pub max_history: Option<usize>,
    /// Map prior system messages into history instead of dropping them.
    pub system_in_history: bool,
}

impl From<&ChatflowConfig> for HistoryOptions {
    fn from(config: &ChatflowConfig) -> Self {
        Self {
            max_history: config.max_history,
            system_in_history: config.system_in_history,
        }
    }
}

/// Maps a host role onto the chatflow schema. Only `assistant` is an API
/// message; everything else, including a missing role, is a user message.
pub fn map_role(role: Option<Role>) -> HistoryRole {
    match role {
        Some(Role::Assistant) => HistoryRole::ApiMessage,
        _ => HistoryRole::UserMessage,
    }
}

/// Converts one prior message into a history entry.
pub fn history_entry(message: &Message) -> HistoryEntry {
    HistoryEntry {
        role: map_role(message.role),
        content: message.text(),
    }
}

/// Builds the prediction request for `conversation`.
///
/// The last message becomes the question, earlier ones the history, and the
/// first system message anywhere in the conversation the system message.
pub fn build_request(
    conversation: &Conversation,
    options: &HistoryOptions,
) -> Result<ChatflowRequest, FlowpipeError> {
    let current = conversation.current().ok_or(FlowpipeError::EmptyInput)?;

    let mut history: Vec<HistoryEntry> = conversation
        .prior()
        .iter()
        .filter(|m| options.system_in_history || !m.is_system())
        .map(history_entry)
        .collect();

    if let Some(max) = options.max_history {
        let excess = history.len().saturating_sub(max);
        history.drain(..excess);
    }

    Ok(ChatflowRequest {
        question: current.text(),
        history,
        system_message: conversation.system_message().map(Message::text),
        override_config: serde_json::Map::new(),
    })
}
