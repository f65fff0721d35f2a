// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! URL checks and video id extraction.

use std::sync::LazyLock;

use flowpipe_core::{FlowpipeError, VideoId};
use regex::Regex;

static VIDEO_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v=([A-Za-z0-9_-]{11})").expect("video id pattern"));

/// Returns true when `url` looks like a YouTube URL.
///
/// Substring match only; `youtu.be` short links are not accepted.
pub fn is_youtube_url(url: &str) -> bool {
    !url.is_empty() && url.contains("youtube.com")
}

/// Finds the first `v=<11 chars>` occurrence in `url`.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PARAM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()))
}

/// Validates `url` and extracts its video id.
pub fn parse_video_url(url: &str) -> Result<VideoId, FlowpipeError> {
    if !is_youtube_url(url) {
        return Err(FlowpipeError::MalformedUrl(url.to_string()));
    }
    extract_video_id(url).ok_or_else(|| FlowpipeError::VideoIdNotFound(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_watch_urls() {
        let id = parse_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");

        let id = parse_video_url("https://m.youtube.com/watch?feature=share&v=abc_DEF-123&t=42").unwrap();
        assert_eq!(id.as_str(), "abc_DEF-123");
    }

    #[test]
    fn rejects_non_youtube_urls() {
        for url in ["", "https://vimeo.com/12345", "https://youtu.be/dQw4w9WgXcQ"] {
            assert!(matches!(
                parse_video_url(url),
                Err(FlowpipeError::MalformedUrl(_))
            ));
        }
    }

    #[test]
    fn rejects_urls_without_video_param() {
        for url in [
            "https://www.youtube.com/",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/channel/UC123",
        ] {
            assert!(matches!(
                parse_video_url(url),
                Err(FlowpipeError::VideoIdNotFound(_))
            ));
        }
    }

    #[test]
    fn takes_first_eleven_characters() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQEXTRA").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    proptest! {
        #[test]
        fn any_valid_id_is_extracted(
            id in "[A-Za-z0-9_-]{11}",
            prefix in "[a-z&=]{0,10}",
        ) {
            let url = format!("https://www.youtube.com/watch?{prefix}&v={id}");
            let extracted = parse_video_url(&url).unwrap();
            prop_assert_eq!(extracted.as_str(), id.as_str());
        }
    }
}
