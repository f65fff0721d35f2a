// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flowpipe - command-line host for the chatflow pipe and transcript tool.
//!
//! Plays the part of the chat host: builds a conversation or tool call,
//! hands it to the registered adapter and prints what comes back.

mod chat;
mod inspect;
mod transcript;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flowpipe_config::{ConfigWarning, LoadedConfig};
use flowpipe_core::Message;

/// Flowpipe - host adapters for Flowise chatflows and YouTube transcripts.
#[derive(Parser, Debug)]
#[command(name = "flowpipe", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask the chatflow pipe a question.
    Chat {
        /// Relay the answer chunk by chunk.
        #[arg(long)]
        stream: bool,
        /// System message placed at the start of the conversation.
        #[arg(long)]
        system: Option<String>,
        /// Prior message as `role:text` (user, assistant or system). Repeatable.
        #[arg(long = "history", value_parser = chat::parse_history_message)]
        history: Vec<Message>,
        /// The question to answer.
        question: String,
    },
    /// Retrieve the transcript of a YouTube video.
    Transcript {
        /// YouTube watch URL.
        url: String,
        /// Print status events as host JSON envelopes.
        #[arg(long)]
        json_events: bool,
    },
    /// List the built-in plugins.
    Plugins {
        /// Only show catalog entries matching this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => flowpipe_config::load_and_validate_path(path),
        None => flowpipe_config::load_and_validate(),
    };
    let LoadedConfig { config, warnings } = match loaded {
        Ok(loaded) => loaded,
        Err(errors) => {
            flowpipe_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);
    log_warnings(&warnings);

    let ok = match cli.command {
        Commands::Chat {
            stream,
            system,
            history,
            question,
        } => chat::run_chat(&config, system, history, question, stream).await,
        Commands::Transcript { url, json_events } => {
            transcript::run_transcript(&config, &url, json_events).await
        }
        Commands::Plugins { search } => inspect::run_plugins(&config, search.as_deref()).await,
        Commands::Config => inspect::run_config(&config, &warnings),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn log_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        tracing::warn!(key = warning.key, "{}", warning.message);
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout only
/// carries adapter output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flowpipe={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
