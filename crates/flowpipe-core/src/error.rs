// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the Flowpipe adapters.

use thiserror::Error;

/// The primary error type used across adapter traits and core operations.
///
/// Adapters never hand this to the host directly: the chatflow pipe renders
/// it into error text and the transcript tool into a status event.
#[derive(Debug, Error)]
pub enum FlowpipeError {
    /// The host sent a conversation without any messages.
    #[error("no messages found in request body")]
    EmptyInput,

    /// The chatflow endpoint answered with a non-2xx status.
    #[error("upstream returned {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// The URL handed to the transcript tool is not a YouTube URL.
    #[error("wrong URL: {0}")]
    MalformedUrl(String),

    /// No `v=<id>` parameter could be found in the URL.
    #[error("cannot extract video ID from URL: {0}")]
    VideoIdNotFound(String),

    /// A transcript could not be retrieved for the requested language(s).
    #[error("{0}")]
    TranscriptUnavailable(String),

    /// Configuration errors (missing endpoint, invalid header value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failures (connection refused, broken stream).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body could not be decoded.
    #[error("parse error: {message}")]
    Parse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FlowpipeError {
    /// Builds a [`FlowpipeError::Transport`] carrying the underlying error.
    pub fn transport<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a [`FlowpipeError::Parse`] carrying the underlying error.
    pub fn parse<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
