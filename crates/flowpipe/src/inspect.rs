// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowpipe plugins` and `flowpipe config` command implementations.

use colored::Colorize;
use flowpipe_config::{ConfigWarning, FlowpipeConfig};
use flowpipe_core::HealthStatus;
use flowpipe_plugin::{search_catalog, PluginRegistry};

/// Lists the registered plugins with status and health. With a query, lists
/// the matching catalog entries instead.
pub async fn run_plugins(config: &FlowpipeConfig, search: Option<&str>) -> bool {
    if let Some(query) = search {
        let results = search_catalog(query);
        if results.is_empty() {
            println!("no plugins match {query:?}");
        }
        for manifest in results {
            println!(
                "{:<20} {:<5} {}",
                manifest.id.bold(),
                manifest.adapter_type,
                manifest.description
            );
        }
        return true;
    }

    let registry = match PluginRegistry::builtin(config) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            return false;
        }
    };

    let health = registry.health_report().await;
    for (entry, (_, status)) in registry.list_all().into_iter().zip(health) {
        let manifest = &entry.manifest;
        let health = match status {
            Ok(HealthStatus::Healthy) => "healthy".green().to_string(),
            Ok(HealthStatus::Degraded(reason)) => format!("degraded ({reason})").yellow().to_string(),
            Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy ({reason})").red().to_string(),
            Err(e) => format!("check failed ({e})").red().to_string(),
        };
        println!(
            "{:<20} {:<5} {:<15} {}",
            manifest.id.bold(),
            manifest.adapter_type,
            entry.status,
            health
        );
        println!("    {} v{}", manifest.name, manifest.version);
        if let Some(function) = &manifest.function_name {
            println!("    function: {function}");
        }
        if !manifest.capabilities.is_empty() {
            println!("    capabilities: {}", manifest.capabilities.join(", "));
        }
    }

    let pipes = registry.pipes();
    if !pipes.is_empty() {
        println!();
        println!("{}", "pipes:".bold());
        for pipe in pipes {
            println!("    {} ({})", pipe.id, pipe.name);
        }
    }
    true
}

/// Renders the effective configuration as TOML with the API key masked.
pub fn render_config(config: &FlowpipeConfig) -> Result<String, toml::ser::Error> {
    let redacted = FlowpipeConfig {
        chatflow: config.chatflow.redacted(),
        ..config.clone()
    };
    toml::to_string_pretty(&redacted)
}

/// Prints the effective configuration and its warnings.
pub fn run_config(config: &FlowpipeConfig, warnings: &[ConfigWarning]) -> bool {
    match render_config(config) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("{}: cannot render configuration: {e}", "error".red());
            return false;
        }
    }
    for warning in warnings {
        eprintln!("{}: {warning}", "warning".yellow());
    }
    true
}
