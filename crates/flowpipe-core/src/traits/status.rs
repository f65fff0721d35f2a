// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status sink trait for host progress notifications.

use async_trait::async_trait;

use crate::types::StatusEvent;

/// Host channel that receives progress and error notifications.
///
/// Emission is fire-and-forget: a sink that fails to deliver must swallow
/// the failure itself.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn emit(&self, event: StatusEvent);
}
