// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional status sink wrapper.

use flowpipe_core::{StatusEvent, StatusSink};
use tracing::debug;

/// Forwards events to the host sink when there is one.
#[derive(Clone, Copy)]
pub struct Emitter<'a> {
    sink: Option<&'a dyn StatusSink>,
}

impl<'a> Emitter<'a> {
    pub fn new(sink: Option<&'a dyn StatusSink>) -> Self {
        Self { sink }
    }

    pub async fn emit(&self, event: StatusEvent) {
        debug!(status = %event.status, done = event.done, description = %event.description, "status");
        if let Some(sink) = self.sink {
            sink.emit(event).await;
        }
    }

    pub async fn in_progress(&self, description: impl Into<String>) {
        self.emit(StatusEvent::in_progress(description)).await;
    }

    pub async fn complete(&self, description: impl Into<String>) {
        self.emit(StatusEvent::complete(description)).await;
    }

    pub async fn error(&self, description: impl Into<String>) {
        self.emit(StatusEvent::error(description)).await;
    }
}
