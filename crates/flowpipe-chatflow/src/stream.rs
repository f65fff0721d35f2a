// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-delimited stream relay for streamed prediction responses.
//!
//! The endpoint streams one JSON object per line. Network chunks do not line
//! up with line boundaries, so bytes are buffered until a full line arrives.
//! Each line is then reduced to the text the host should see: the `text`
//! field of a JSON object, or the raw line when it is not JSON at all.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use flowpipe_core::{FlowpipeError, TextStream};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error_text;
use crate::types::text_field;

/// Accumulates raw bytes and hands out complete lines.
///
/// Bytes are kept undecoded until a newline is seen so that a multi-byte
/// UTF-8 character split across two network chunks survives intact.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and returns every line completed by them, without
    /// the trailing `\n` or `\r\n`.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Returns the trailing unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.pending);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Reduces one streamed line to the chunk the host should see.
///
/// - empty line: nothing
/// - JSON object with `text`: that text
/// - any other JSON value: nothing
/// - not JSON: the line unchanged
pub fn decode_stream_line(line: &str) -> Option<String> {
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(line) {
        Ok(value) => text_field(&value),
        Err(_) => Some(line.to_string()),
    }
}

type ByteStream<B, E> = Pin<Box<dyn Stream<Item = Result<B, E>> + Send>>;

struct RelayState<B, E> {
    /// `None` once the upstream is exhausted or failed; dropping it closes
    /// the connection.
    bytes: Option<ByteStream<B, E>>,
    buffer: LineBuffer,
    ready: VecDeque<String>,
}

impl<B: AsRef<[u8]>, E: Display> RelayState<B, E> {
    fn push_lines(&mut self, lines: impl IntoIterator<Item = String>) {
        self.ready
            .extend(lines.into_iter().filter_map(|line| decode_stream_line(&line)));
    }
}

/// Turns a byte stream into the lazy text sequence handed to the host.
///
/// The sequence ends when the upstream closes. A transport error yields one
/// final error chunk and ends the sequence. Dropping the returned stream at
/// any point drops the upstream with it.
pub fn relay_lines<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = RelayState {
        bytes: Some(Box::pin(bytes) as ByteStream<B, E>),
        buffer: LineBuffer::new(),
        ready: VecDeque::new(),
    };

    let chunks = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(chunk) = state.ready.pop_front() {
                return Some((chunk, state));
            }
            let upstream = state.bytes.as_mut()?;
            match upstream.next().await {
                Some(Ok(bytes)) => {
                    let lines = state.buffer.feed(bytes.as_ref());
                    state.push_lines(lines);
                }
                Some(Err(e)) => {
                    warn!(error = %e, "chatflow stream interrupted");
                    state.bytes = None;
                    let err = FlowpipeError::Transport {
                        message: format!("stream interrupted: {e}"),
                        source: None,
                    };
                    state.ready.push_back(error_text(&err));
                }
                None => {
                    debug!("chatflow stream finished");
                    state.bytes = None;
                    let tail = state.buffer.finish();
                    state.push_lines(tail);
                }
            }
        }
    });

    Box::pin(chunks)
}
