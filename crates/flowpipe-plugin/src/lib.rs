// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, manifests, and built-in adapter catalog.
//!
//! This is the surface a host uses to discover the adapters: stable ids,
//! the `pipes` listing of every enabled pipe, and tool lookup by function
//! name. Each plugin has a manifest describing its metadata, capabilities
//! and the configuration keys it needs.

pub mod catalog;
pub mod manifest;
pub mod registry;

pub use catalog::{builtin_catalog, search_catalog};
pub use manifest::PluginManifest;
pub use registry::{PluginAdapterHandle, PluginEntry, PluginRegistry, PluginStatus};
