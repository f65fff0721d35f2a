// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest: the metadata a host sees for each adapter.

use flowpipe_core::types::AdapterType;
use serde::{Deserialize, Serialize};

/// Manifest describing a host adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Stable id the host registers the adapter under (e.g. "flowise_chat").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    pub description: String,
    /// Pipe or Tool.
    pub adapter_type: AdapterType,
    /// Function name the host model calls. Tools only.
    pub function_name: Option<String>,
    /// Capabilities the adapter provides (e.g. ["streaming"]).
    pub capabilities: Vec<String>,
    /// Config keys the adapter needs to be fully usable (e.g. ["chatflow.api_key"]).
    pub config_keys: Vec<String>,
}
