// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipe adapter trait for chat targets the host can select.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::traits::adapter::PluginAdapter;
use crate::types::{PipeDescriptor, PipeRequest};

/// A lazily produced, single-pass sequence of text chunks.
///
/// Dropping the stream releases whatever connection backs it.
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// What a pipe hands back to the host.
pub enum PipeOutput {
    /// The whole answer.
    Text(String),
    /// The answer, chunk by chunk.
    Stream(TextStream),
    /// A human-readable description of what went wrong.
    Error(String),
}

impl PipeOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, PipeOutput::Error(_))
    }
}

impl fmt::Debug for PipeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeOutput::Text(text) => f.debug_tuple("Text").field(text).finish(),
            PipeOutput::Stream(_) => f.write_str("Stream(..)"),
            PipeOutput::Error(msg) => f.debug_tuple("Error").field(msg).finish(),
        }
    }
}

/// Adapter answering host conversations.
///
/// `pipe` must not fail: every internal error is folded into
/// [`PipeOutput::Error`].
#[async_trait]
pub trait PipeAdapter: PluginAdapter {
    /// Entries the host lists as selectable chat targets.
    fn pipes(&self) -> Vec<PipeDescriptor>;

    /// Answers the conversation carried by `request`.
    async fn pipe(&self, request: PipeRequest) -> PipeOutput;
}
