// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Flowpipe adapters.
//!
//! TOML parsing with strict key checking (`deny_unknown_fields`), XDG file
//! hierarchy lookup, environment variable overrides, and miette diagnostics
//! with typo suggestions. Semantic problems that do not prevent the adapters
//! from being registered are reported as [`ConfigWarning`]s.
//!
//! # Usage
//!
//! ```no_run
//! use flowpipe_config::load_and_validate;
//!
//! let loaded = load_and_validate().expect("config errors");
//! for warning in &loaded.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! println!("endpoint: {}", loaded.config.chatflow.prediction_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ChatflowConfig, FlowpipeConfig, LoggingConfig, TranscriptConfig};
pub use validation::{validate_config, ConfigWarning};

/// A configuration that passed validation, with its non-fatal findings.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: FlowpipeConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration from the file hierarchy and environment, then validate it.
pub fn load_and_validate() -> Result<LoadedConfig, Vec<ConfigError>> {
    let sources = collect_toml_sources();
    tracing::debug!(files = sources.len(), "loading configuration");
    finish(loader::load_config(), &sources)
}

/// Load configuration from an explicit file (plus environment) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<LoadedConfig, Vec<ConfigError>> {
    let sources = std::fs::read_to_string(path)
        .map(|content| vec![(path.display().to_string(), content)])
        .unwrap_or_default();
    finish(loader::load_config_from_path(path), &sources)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<LoadedConfig, Vec<ConfigError>> {
    let sources = vec![("<inline>".to_string(), toml_content.to_string())];
    finish(loader::load_config_from_str(toml_content), &sources)
}

fn finish(
    loaded: Result<FlowpipeConfig, figment::Error>,
    sources: &[(String, String)],
) -> Result<LoadedConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            let warnings = validation::validate_config(&config)?;
            Ok(LoadedConfig { config, warnings })
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, sources)),
    }
}

/// Read the contents of every existing config file for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_file_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            // figment records absolute paths for file sources
            let path = std::fs::canonicalize(&path).unwrap_or(path);
            Some((path.display().to_string(), content))
        })
        .collect()
}
