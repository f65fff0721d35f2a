// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status sink that records every event it receives.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use flowpipe_core::traits::status::StatusSink;
use flowpipe_core::types::{StatusEvent, StatusKind};

/// Captures emitted [`StatusEvent`]s for later inspection.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, in emission order.
    pub async fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().await.clone()
    }

    /// Just the status kinds, in emission order.
    pub async fn kinds(&self) -> Vec<StatusKind> {
        self.events.lock().await.iter().map(|e| e.status).collect()
    }
}

#[async_trait]
impl StatusSink for RecordingSink {
    async fn emit(&self, event: StatusEvent) {
        self.events.lock().await.push(event);
    }
}
