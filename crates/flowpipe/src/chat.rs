// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowpipe chat` command implementation.

use std::io::Write;

use colored::Colorize;
use flowpipe_config::FlowpipeConfig;
use flowpipe_chatflow::is_error_text;
use flowpipe_core::{Conversation, Message, PipeOutput, PipeRequest, Role};
use flowpipe_plugin::PluginRegistry;
use futures::{Stream, StreamExt};

/// Parses a `role:text` history argument.
pub fn parse_history_message(raw: &str) -> Result<Message, String> {
    let (role, text) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected role:text, got {raw:?}"))?;
    let role = match role.trim() {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        "system" => Role::System,
        other => {
            return Err(format!(
                "unknown role {other:?}; expected user, assistant or system"
            ));
        }
    };
    Ok(Message::new(role, text))
}

/// Builds the conversation the host would send: system message first, then
/// the prior messages, then the question.
pub fn build_conversation(
    system: Option<String>,
    history: Vec<Message>,
    question: String,
) -> Conversation {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if let Some(system) = system {
        messages.push(Message::system(system));
    }
    messages.extend(history);
    messages.push(Message::user(question));
    Conversation::new(messages)
}

/// Writes streamed chunks to `out` as they arrive.
///
/// An error chunk ends the stream: it goes to stderr and the result is
/// `Ok(false)`.
pub async fn write_stream<S, W>(mut chunks: S, out: &mut W) -> std::io::Result<bool>
where
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    while let Some(chunk) = chunks.next().await {
        if is_error_text(&chunk) {
            writeln!(out)?;
            out.flush()?;
            eprintln!("{}", chunk.red());
            return Ok(false);
        }
        write!(out, "{chunk}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(true)
}

/// Runs one chat turn. Returns false when the pipe answered with an error.
pub async fn run_chat(
    config: &FlowpipeConfig,
    system: Option<String>,
    history: Vec<Message>,
    question: String,
    stream: bool,
) -> bool {
    let registry = match PluginRegistry::builtin(config) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            return false;
        }
    };
    let Some(pipe) = registry.pipe_for(&config.chatflow.pipe_id) else {
        eprintln!(
            "{}: pipe {} is not registered",
            "error".red(),
            config.chatflow.pipe_id
        );
        return false;
    };

    let request = PipeRequest {
        messages: build_conversation(system, history, question),
        stream,
    };

    match pipe.pipe(request).await {
        PipeOutput::Text(text) => {
            println!("{text}");
            true
        }
        PipeOutput::Stream(chunks) => match write_stream(chunks, &mut std::io::stdout()).await {
            Ok(completed) => completed,
            Err(e) => {
                eprintln!("{}: failed to write answer: {e}", "error".red());
                false
            }
        },
        PipeOutput::Error(message) => {
            eprintln!("{}", message.red());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn streamed_chunks_are_written_in_order() {
        let chunks = futures::stream::iter(vec!["a".to_string(), "notjson".to_string()]);
        let mut out = Vec::new();
        assert!(write_stream(chunks, &mut out).await.unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "anotjson\n");
    }

    #[tokio::test]
    async fn interrupted_stream_reports_failure() {
        let chunks = futures::stream::iter(vec![
            "partial".to_string(),
            "Error in Flowise pipe: transport error: stream interrupted: reset".to_string(),
        ]);
        let mut out = Vec::new();
        assert!(!write_stream(chunks, &mut out).await.unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "partial\n");
    }

    #[test]
    fn history_argument_parses_role_and_text() {
        assert_eq!(
            parse_history_message("assistant:it is: 42").unwrap(),
            Message::assistant("it is: 42")
        );
        assert!(parse_history_message("no separator").is_err());
        assert!(parse_history_message("tool:x").is_err());
    }

    #[test]
    fn conversation_puts_system_first_and_question_last() {
        let conv = build_conversation(
            Some("S".into()),
            vec![Message::user("A"), Message::assistant("B")],
            "C".into(),
        );
        assert_eq!(conv.len(), 4);
        assert!(conv.messages()[0].is_system());
        assert_eq!(conv.current().map(Message::text).as_deref(), Some("C"));

        let conv = build_conversation(None, vec![], "only".into());
        assert_eq!(conv.len(), 1);
    }
}
