// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use flowpipe_core::{TranscriptFormatter, TranscriptSegment};

/// Plain text, one segment per line, timing dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TranscriptFormatter for TextFormatter {
    fn format(&self, segments: &[TranscriptSegment]) -> String {
        segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> TranscriptSegment {
        TranscriptSegment {
            text: text.into(),
            start: 0.0,
            duration: 1.0,
        }
    }

    #[test]
    fn joins_with_newlines_in_order() {
        let text = TextFormatter.format(&[segment("first"), segment("second"), segment("third")]);
        assert_eq!(text, "first\nsecond\nthird");
    }

    #[test]
    fn empty_input_is_empty_text() {
        assert_eq!(TextFormatter.format(&[]), "");
    }
}
