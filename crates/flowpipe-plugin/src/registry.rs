// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry holding the live adapters a host can call.
//!
//! The `PluginRegistry` stores `PluginEntry` records keyed by plugin id.
//! Each entry pairs a manifest and status with the adapter instance itself.

use std::collections::HashMap;
use std::sync::Arc;

use flowpipe_chatflow::ChatflowPipe;
use flowpipe_config::FlowpipeConfig;
use flowpipe_core::types::{AdapterType, HealthStatus, PipeDescriptor};
use flowpipe_core::{FlowpipeError, PipeAdapter, PluginAdapter, ToolAdapter};
use flowpipe_transcript::TranscriptTool;
use tracing::{info, warn};

use crate::catalog::builtin_catalog;
use crate::manifest::PluginManifest;

/// Status of a plugin in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginStatus {
    /// Plugin is configured and ready.
    Enabled,
    /// Plugin is registered but missing required configuration. It is still
    /// listed; calls answer with an error until configured.
    NotConfigured,
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginStatus::Enabled => write!(f, "enabled"),
            PluginStatus::NotConfigured => write!(f, "not-configured"),
        }
    }
}

/// A live adapter instance of either kind.
#[derive(Clone)]
pub enum PluginAdapterHandle {
    Pipe(Arc<dyn PipeAdapter>),
    Tool(Arc<dyn ToolAdapter>),
}

impl PluginAdapterHandle {
    pub fn adapter_type(&self) -> AdapterType {
        match self {
            PluginAdapterHandle::Pipe(_) => AdapterType::Pipe,
            PluginAdapterHandle::Tool(_) => AdapterType::Tool,
        }
    }

    pub async fn health_check(&self) -> Result<HealthStatus, FlowpipeError> {
        match self {
            PluginAdapterHandle::Pipe(pipe) => pipe.health_check().await,
            PluginAdapterHandle::Tool(tool) => tool.health_check().await,
        }
    }
}

/// A single entry in the plugin registry.
pub struct PluginEntry {
    pub manifest: PluginManifest,
    pub status: PluginStatus,
    pub adapter: PluginAdapterHandle,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("manifest", &self.manifest)
            .field("status", &self.status)
            .field("adapter", &self.adapter.adapter_type())
            .finish()
    }
}

/// Registry of live host adapters, keyed by id.
pub struct PluginRegistry {
    entries: HashMap<String, PluginEntry>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a registry holding every built-in adapter configured from
    /// `config`.
    ///
    /// A chatflow pipe without endpoint or key is registered as
    /// [`PluginStatus::NotConfigured`].
    pub fn builtin(config: &FlowpipeConfig) -> Result<Self, FlowpipeError> {
        let mut registry = Self::new();
        let mut catalog = builtin_catalog().into_iter();

        let pipe = ChatflowPipe::new(&config.chatflow)?;
        let pipe_status = if config.chatflow.prediction_url.trim().is_empty()
            || config.chatflow.api_key.is_empty()
        {
            PluginStatus::NotConfigured
        } else {
            PluginStatus::Enabled
        };
        if let Some(manifest) = catalog.next() {
            registry.register_with_status(
                manifest,
                PluginAdapterHandle::Pipe(Arc::new(pipe)),
                pipe_status,
            );
        }

        let tool = TranscriptTool::new(&config.transcript)?;
        if let Some(manifest) = catalog.next() {
            registry.register(manifest, PluginAdapterHandle::Tool(Arc::new(tool)));
        }

        info!(plugins = registry.len(), "plugin registry ready");
        Ok(registry)
    }

    /// Register a plugin with default status `Enabled`.
    pub fn register(&mut self, manifest: PluginManifest, adapter: PluginAdapterHandle) {
        self.register_with_status(manifest, adapter, PluginStatus::Enabled);
    }

    /// Register a plugin with an explicit status. An existing entry with the
    /// same id is replaced.
    pub fn register_with_status(
        &mut self,
        manifest: PluginManifest,
        adapter: PluginAdapterHandle,
        status: PluginStatus,
    ) {
        if manifest.adapter_type != adapter.adapter_type() {
            warn!(
                id = %manifest.id,
                manifest = %manifest.adapter_type,
                adapter = %adapter.adapter_type(),
                "manifest adapter type does not match adapter"
            );
        }
        let id = manifest.id.clone();
        if self
            .entries
            .insert(
                id.clone(),
                PluginEntry {
                    manifest,
                    status,
                    adapter,
                },
            )
            .is_some()
        {
            warn!(id = %id, "replaced existing plugin registration");
        }
    }

    /// The pipe serving the host-facing pipe id `pipe_id` (as listed by
    /// [`PluginRegistry::pipes`]).
    pub fn pipe_for(&self, pipe_id: &str) -> Option<Arc<dyn PipeAdapter>> {
        self.entries.values().find_map(|entry| match &entry.adapter {
            PluginAdapterHandle::Pipe(pipe) if pipe.pipes().iter().any(|p| p.id == pipe_id) => {
                Some(pipe.clone())
            }
            _ => None,
        })
    }

    /// The tool whose function is named `function_name`.
    pub fn tool(&self, function_name: &str) -> Option<Arc<dyn ToolAdapter>> {
        self.entries.values().find_map(|entry| match &entry.adapter {
            PluginAdapterHandle::Tool(tool) if tool.function_name() == function_name => {
                Some(tool.clone())
            }
            _ => None,
        })
    }

    /// Every pipe entry the host lists, sorted by id.
    pub fn pipes(&self) -> Vec<PipeDescriptor> {
        let mut pipes: Vec<PipeDescriptor> = self
            .entries
            .values()
            .filter_map(|entry| match &entry.adapter {
                PluginAdapterHandle::Pipe(pipe) => Some(pipe.pipes()),
                PluginAdapterHandle::Tool(_) => None,
            })
            .flatten()
            .collect();
        pipes.sort_by(|a, b| a.id.cmp(&b.id));
        pipes
    }

    /// List all plugin entries, sorted by id.
    pub fn list_all(&self) -> Vec<&PluginEntry> {
        let mut entries: Vec<&PluginEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.manifest.id.cmp(&b.manifest.id));
        entries
    }

    /// Health of every registered plugin, sorted by id.
    pub async fn health_report(&self) -> Vec<(String, Result<HealthStatus, FlowpipeError>)> {
        let mut report = Vec::with_capacity(self.entries.len());
        for entry in self.list_all() {
            report.push((entry.manifest.id.clone(), entry.adapter.health_check().await));
        }
        report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpipe_config::ChatflowConfig;
    use flowpipe_test_utils::MockTranscriptProvider;

    fn configured() -> FlowpipeConfig {
        FlowpipeConfig {
            chatflow: ChatflowConfig {
                prediction_url: "http://localhost:3000/api/v1/prediction/abc".into(),
                api_key: "key".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn tool_manifest(id: &str, function_name: &str) -> PluginManifest {
        PluginManifest {
            id: id.to_string(),
            name: format!("Test tool {id}"),
            version: "0.1.0".to_string(),
            description: String::new(),
            adapter_type: AdapterType::Tool,
            function_name: Some(function_name.to_string()),
            capabilities: vec![],
            config_keys: vec![],
        }
    }

    fn mock_tool() -> PluginAdapterHandle {
        PluginAdapterHandle::Tool(Arc::new(TranscriptTool::with_provider(
            Arc::new(MockTranscriptProvider::new()),
            vec!["en".into()],
        )))
    }

    #[test]
    fn builtin_registers_pipe_and_tool() {
        let registry = PluginRegistry::builtin(&configured()).unwrap();
        assert_eq!(registry.len(), 2);

        let chat = registry.list_all()[0];
        assert_eq!(chat.manifest.id, "flowise_chat");
        assert_eq!(chat.status, PluginStatus::Enabled);
        assert_eq!(chat.adapter.adapter_type(), AdapterType::Pipe);

        assert!(registry.pipe_for("flowise_chat").is_some());
        assert!(registry.tool("get_text_from_url").is_some());
        assert!(registry.tool("youtube_transcript").is_none());
    }

    #[test]
    fn builtin_lists_configured_pipe_name() {
        let mut config = configured();
        config.chatflow.pipe_id = "support_flow".into();
        config.chatflow.pipe_name = "Support Bot".into();

        let registry = PluginRegistry::builtin(&config).unwrap();
        assert_eq!(
            registry.pipes(),
            vec![PipeDescriptor {
                id: "support_flow".into(),
                name: "Support Bot".into(),
            }]
        );
        assert!(registry.pipe_for("support_flow").is_some());
        assert!(registry.pipe_for("flowise_chat").is_none());
    }

    #[test]
    fn unconfigured_pipe_is_still_listed() {
        let registry = PluginRegistry::builtin(&FlowpipeConfig::default()).unwrap();
        let chat = registry.list_all()[0];
        assert_eq!(chat.status, PluginStatus::NotConfigured);
        assert_eq!(chat.status.to_string(), "not-configured");
        assert_eq!(registry.pipes().len(), 1);
    }

    #[test]
    fn register_replaces_and_lists_sorted() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());
        registry.register(tool_manifest("zeta", "z"), mock_tool());
        registry.register(tool_manifest("alpha", "a"), mock_tool());
        registry.register(tool_manifest("alpha", "a2"), mock_tool());

        let all = registry.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].manifest.id, "alpha");
        assert_eq!(all[0].manifest.function_name.as_deref(), Some("a2"));
        assert_eq!(all[1].manifest.id, "zeta");
        assert!(registry.tool("get_text_from_url").is_some());
        assert!(registry.pipes().is_empty());
    }

    #[tokio::test]
    async fn health_report_covers_every_plugin() {
        let registry = PluginRegistry::builtin(&FlowpipeConfig::default()).unwrap();
        let report = registry.health_report().await;
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].0, "flowise_chat");
        assert!(matches!(report[0].1, Ok(HealthStatus::Degraded(_))));
        assert!(matches!(report[1].1, Ok(HealthStatus::Healthy)));
    }
}
