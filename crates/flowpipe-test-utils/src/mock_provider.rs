// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transcript provider for deterministic testing.
//!
//! `MockTranscriptProvider` implements `TranscriptProvider` with outcomes
//! scripted per language tag and records every language it was asked for.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use flowpipe_core::traits::transcript::TranscriptProvider;
use flowpipe_core::types::{TranscriptSegment, VideoId};
use flowpipe_core::FlowpipeError;

/// A mock provider answering from a per-language script.
///
/// Languages without a scripted outcome fail with
/// [`FlowpipeError::TranscriptUnavailable`].
#[derive(Clone, Default)]
pub struct MockTranscriptProvider {
    outcomes: Arc<Mutex<HashMap<String, Result<Vec<TranscriptSegment>, String>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockTranscriptProvider {
    /// Create a provider for which every language fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful transcript for `language`, one segment per line.
    pub async fn succeed(&self, language: &str, lines: &[&str]) {
        let segments = lines
            .iter()
            .enumerate()
            .map(|(i, line)| TranscriptSegment {
                text: line.to_string(),
                start: i as f64 * 2.0,
                duration: 2.0,
            })
            .collect();
        self.outcomes
            .lock()
            .await
            .insert(language.to_string(), Ok(segments));
    }

    /// Script a failure with `message` for `language`.
    pub async fn fail(&self, language: &str, message: &str) {
        self.outcomes
            .lock()
            .await
            .insert(language.to_string(), Err(message.to_string()));
    }

    /// Languages requested so far, in call order.
    pub async fn languages_requested(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|(_, language)| language.clone())
            .collect()
    }

    /// Number of fetch calls so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Video ids requested so far, in call order.
    pub async fn videos_requested(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|(video, _)| video.clone())
            .collect()
    }
}

#[async_trait]
impl TranscriptProvider for MockTranscriptProvider {
    async fn fetch(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, FlowpipeError> {
        self.calls
            .lock()
            .await
            .push((video_id.to_string(), language.to_string()));

        match self.outcomes.lock().await.get(language) {
            Some(Ok(segments)) => Ok(segments.clone()),
            Some(Err(message)) => Err(FlowpipeError::TranscriptUnavailable(message.clone())),
            None => Err(FlowpipeError::TranscriptUnavailable(format!(
                "no transcript for language {language}"
            ))),
        }
    }
}
