// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript retrieval collaborators.

use async_trait::async_trait;

use crate::error::FlowpipeError;
use crate::types::{TranscriptSegment, VideoId};

/// Source of time-coded transcripts, one language tag at a time.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, FlowpipeError>;
}

/// Turns transcript segments into flat text.
pub trait TranscriptFormatter: Send + Sync {
    fn format(&self, segments: &[TranscriptSegment]) -> String;
}
