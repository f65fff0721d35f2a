// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits: host messages, conversations,
//! status events and transcript data.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is usable but missing something (e.g. an unset API key).
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies how the host presents an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    /// A selectable chat target that answers conversations.
    Pipe,
    /// A function the host's model can call with JSON arguments.
    Tool,
}

// --- Host messages ---

/// Role of a message author as sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Any role the host sends that is not one of the above.
    #[serde(other)]
    Other,
}

/// One element of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part type (`text`, `image_url`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Text payload, present for `text` parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentPart {
    /// Creates a `text` part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
        }
    }
}

/// Message body: a plain string or an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single host message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Creates a message with plain text content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            content: Some(MessageContent::Text(content.into())),
        }
    }

    /// Creates a message whose content is a list of parts.
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role: Some(role),
            content: Some(MessageContent::Parts(parts)),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns true if this message was authored with the `system` role.
    pub fn is_system(&self) -> bool {
        self.role == Some(Role::System)
    }

    /// Flattens the content into a single string.
    ///
    /// Parts of type `text` are joined with single spaces in order; other
    /// part types are dropped. Absent content flattens to an empty string.
    pub fn text(&self) -> String {
        match &self.content {
            None => String::new(),
            Some(MessageContent::Text(text)) => text.clone(),
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .filter(|part| part.kind == "text")
                .map(|part| part.text.as_deref().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// An ordered conversation. The last message is the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation(pub Vec<Message>);

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message being answered.
    pub fn current(&self) -> Option<&Message> {
        self.0.last()
    }

    /// Every message before the current one, in chronological order.
    pub fn prior(&self) -> &[Message] {
        match self.0.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// The first message with the `system` role, if any.
    pub fn system_message(&self) -> Option<&Message> {
        self.0.iter().find(|m| m.is_system())
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}

/// Body the host sends to a pipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipeRequest {
    #[serde(default)]
    pub messages: Conversation,
    #[serde(default)]
    pub stream: bool,
}

/// An entry of a pipe's `pipes()` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeDescriptor {
    pub id: String,
    pub name: String,
}

// --- Status events ---

/// Progress state carried by a [`StatusEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    InProgress,
    Complete,
    Error,
}

/// A progress or error notification sent to the host's status sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub status: StatusKind,
    pub description: String,
    pub done: bool,
}

impl StatusEvent {
    pub fn in_progress(description: impl Into<String>) -> Self {
        Self {
            status: StatusKind::InProgress,
            description: description.into(),
            done: false,
        }
    }

    pub fn complete(description: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Complete,
            description: description.into(),
            done: true,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Error,
            description: description.into(),
            done: true,
        }
    }
}

/// Wire envelope the host expects from its event emitter:
/// `{"type": "status", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum HostEvent {
    Status(StatusEvent),
}

// --- Transcripts ---

/// An 11-character YouTube video identifier (`[A-Za-z0-9_-]{11}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub const LEN: usize = 11;

    /// Validates and wraps a raw identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == Self::LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One time-coded line of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration, in seconds.
    pub duration: f64,
}

/// Output of a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}
