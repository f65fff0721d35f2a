// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool adapter trait for functions the host's model can call.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::traits::status::StatusSink;
use crate::types::ToolOutput;

/// Adapter exposing a single callable function to the host's model.
#[async_trait]
pub trait ToolAdapter: PluginAdapter {
    /// Function name the model calls.
    fn function_name(&self) -> &str;

    /// Instructions shown to the model alongside the function.
    fn description(&self) -> &str;

    /// JSON Schema of the function's arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Runs the function. Failures are reported through `sink` and the
    /// returned output, never as an error.
    async fn invoke(&self, input: serde_json::Value, sink: Option<&dyn StatusSink>)
    -> ToolOutput;
}
