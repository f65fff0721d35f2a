// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all host-facing adapters implement.

use async_trait::async_trait;

use crate::error::FlowpipeError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Flowpipe plugin adapters.
///
/// Provides the identity the host registers the adapter under plus a cheap
/// health check.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Stable identifier the host registers this adapter under.
    fn id(&self) -> &str;

    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns how the host should present this adapter.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, FlowpipeError>;
}
