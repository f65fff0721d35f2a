// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowpipe transcript` command implementation.
//!
//! Status events go to stderr, the transcript to stdout.

use async_trait::async_trait;
use colored::Colorize;
use flowpipe_config::FlowpipeConfig;
use flowpipe_core::{HostEvent, StatusEvent, StatusKind, StatusSink};
use flowpipe_plugin::PluginRegistry;
use flowpipe_transcript::FUNCTION_NAME;

/// Prints status events to stderr, either as colored lines or as the JSON
/// envelope a chat host would receive.
pub struct ConsoleSink {
    json: bool,
}

impl ConsoleSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn render(&self, event: &StatusEvent) -> String {
        if self.json {
            let envelope = HostEvent::Status(event.clone());
            return serde_json::to_string(&envelope).unwrap_or_default();
        }
        let marker = match event.status {
            StatusKind::InProgress => "…".yellow(),
            StatusKind::Complete => "✓".green(),
            StatusKind::Error => "✗".red(),
        };
        format!("{marker} {}", event.description)
    }
}

#[async_trait]
impl StatusSink for ConsoleSink {
    async fn emit(&self, event: StatusEvent) {
        eprintln!("{}", self.render(&event));
    }
}

/// Runs the transcript tool on `url`. Returns false when no text came back.
pub async fn run_transcript(config: &FlowpipeConfig, url: &str, json_events: bool) -> bool {
    let registry = match PluginRegistry::builtin(config) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            return false;
        }
    };
    let Some(tool) = registry.tool(FUNCTION_NAME) else {
        eprintln!("{}: tool {FUNCTION_NAME} is not registered", "error".red());
        return false;
    };

    let sink = ConsoleSink::new(json_events);
    let output = tool
        .invoke(serde_json::json!({ "url": url }), Some(&sink))
        .await;
    if !output.is_error {
        println!("{}", output.content);
    }
    !output.is_error
}
