// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YouTube caption provider.
//!
//! Reads the caption track list embedded in a video's watch page, picks the
//! track matching a language tag and parses its timed-text XML.

use std::sync::LazyLock;

use async_trait::async_trait;
use flowpipe_config::TranscriptConfig;
use flowpipe_core::{FlowpipeError, TranscriptProvider, TranscriptSegment, VideoId};
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// Suffix selecting the auto-generated track of a language.
pub const AUTO_SUFFIX: &str = "_auto";

const CAPTIONS_MARKER: &str = "\"captions\":";

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\b([^>]*)>(.*?)</text>"#).expect("text element pattern")
});
static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("attribute pattern"));
static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("inline tag pattern"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|lt|gt|quot|apos);").expect("entity pattern")
});

/// One entry of the player's caption track list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `asr` for auto-generated tracks, absent for uploaded ones.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TrackList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackList {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// Reads the caption tracks out of a watch page.
///
/// Returns `None` when the page carries no caption data at all.
pub fn caption_tracks(page: &str) -> Option<Vec<CaptionTrack>> {
    let start = page.find(CAPTIONS_MARKER)? + CAPTIONS_MARKER.len();
    let captions: Captions = serde_json::Deserializer::from_str(&page[start..])
        .into_iter::<Captions>()
        .next()?
        .ok()?;
    let tracks = captions.player_captions_tracklist_renderer?.caption_tracks;
    (!tracks.is_empty()).then_some(tracks)
}

/// Picks the track for a language tag.
///
/// A plain tag prefers the uploaded track and falls back to the generated
/// one; a tag ending in `_auto` only matches the generated track.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    if let Some(code) = language.strip_suffix(AUTO_SUFFIX) {
        return tracks
            .iter()
            .find(|t| t.language_code == code && t.is_generated());
    }
    tracks
        .iter()
        .find(|t| t.language_code == language && !t.is_generated())
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.language_code == language && t.is_generated())
        })
}

/// Parses timed-text XML into segments, dropping empty ones.
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let raw = caps.get(2).map_or("", |m| m.as_str());

            let decoded = decode_entities(raw);
            let text = INLINE_TAG.replace_all(&decoded, "").trim().to_string();
            if text.is_empty() {
                return None;
            }

            let mut start = 0.0;
            let mut duration = 0.0;
            for attr in ATTRIBUTE.captures_iter(attrs) {
                let value = attr[2].parse::<f64>().unwrap_or(0.0);
                match &attr[1] {
                    "start" => start = value,
                    "dur" => duration = value,
                    _ => {}
                }
            }
            Some(TranscriptSegment {
                text,
                start,
                duration,
            })
        })
        .collect()
}

/// Decodes the XML/HTML entities found in timed text.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = match entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse().ok(),
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
        .into_owned()
}

/// [`TranscriptProvider`] reading captions straight from YouTube pages.
#[derive(Debug, Clone)]
pub struct YoutubeTranscriptProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl YoutubeTranscriptProvider {
    pub fn new(config: &TranscriptConfig) -> Result<Self, FlowpipeError> {
        let base_url = Url::parse(config.youtube_base_url.trim()).map_err(|e| {
            FlowpipeError::Config(format!(
                "invalid transcript.youtube_base_url {:?}: {e}",
                config.youtube_base_url
            ))
        })?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FlowpipeError::transport("failed to build HTTP client", e))?;
        Ok(Self { client, base_url })
    }

    async fn get_text(&self, url: Url) -> Result<String, FlowpipeError> {
        debug!(url = %url, "fetching");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.8")
            .send()
            .await
            .map_err(|e| FlowpipeError::transport(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowpipeError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }
        response
            .text()
            .await
            .map_err(|e| FlowpipeError::transport("failed to read response body", e))
    }

    fn resolve(&self, url: &str) -> Result<Url, FlowpipeError> {
        self.base_url
            .join(url)
            .map_err(|e| FlowpipeError::parse(format!("invalid caption URL {url:?}"), e))
    }

    async fn tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>, FlowpipeError> {
        let mut watch = self.resolve("/watch")?;
        watch.query_pairs_mut().append_pair("v", video_id.as_str());
        let page = self.get_text(watch).await?;
        caption_tracks(&page).ok_or_else(|| {
            FlowpipeError::TranscriptUnavailable(format!(
                "transcripts are disabled or unavailable for video {video_id}"
            ))
        })
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    async fn fetch(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, FlowpipeError> {
        let tracks = self.tracks(video_id).await?;
        let track = select_track(&tracks, language).ok_or_else(|| {
            let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
            FlowpipeError::TranscriptUnavailable(format!(
                "no transcript for language {language} in video {video_id} (available: {})",
                available.join(", ")
            ))
        })?;

        let xml = self.get_text(self.resolve(&track.base_url)?).await?;
        let segments = parse_timed_text(&xml);
        debug!(video = %video_id, language, segments = segments.len(), "transcript parsed");
        if segments.is_empty() {
            return Err(FlowpipeError::TranscriptUnavailable(format!(
                "transcript for language {language} in video {video_id} is empty"
            )));
        }
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMED_TEXT: &str = r##"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="2.1">Hello &amp; welcome</text><text start="2.6" dur="1.9">it&#39;s <font color="#E5E5E5">great</font></text><text start="4.5" dur="1">   </text><text start="5.5" dur="3">bye</text></transcript>"##;

    fn track(code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("/api/timedtext?lang={code}"),
            language_code: code.into(),
            kind: kind.map(String::from),
        }
    }

    fn watch_page(tracks: &str) -> String {
        format!(
            r#"<html><script>var ytInitialPlayerResponse = {{"playabilityStatus":{{"status":"OK"}},"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":{tracks},"audioTracks":[]}}}},"videoDetails":{{"videoId":"dQw4w9WgXcQ"}}}};</script></html>"#
        )
    }

    #[test]
    fn reads_tracks_from_watch_page() {
        let page = watch_page(
            r#"[{"baseUrl":"https://www.youtube.com/api/timedtext?v=x&lang=en","languageCode":"en","kind":"asr","name":{"simpleText":"English"}},{"baseUrl":"/api/timedtext?lang=pt","languageCode":"pt"}]"#,
        );
        let tracks = caption_tracks(&page).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].base_url, "https://www.youtube.com/api/timedtext?v=x&lang=en");
        assert!(tracks[0].is_generated());
        assert!(!tracks[1].is_generated());
    }

    #[test]
    fn page_without_captions_has_no_tracks() {
        assert!(caption_tracks("<html>no player here</html>").is_none());
        assert!(caption_tracks(&watch_page("[]")).is_none());
    }

    #[test]
    fn plain_tag_prefers_uploaded_track() {
        let tracks = vec![track("en", Some("asr")), track("en", None), track("pt", Some("asr"))];
        assert_eq!(select_track(&tracks, "en"), Some(&tracks[1]));
        assert_eq!(select_track(&tracks, "pt"), Some(&tracks[2]));
        assert_eq!(select_track(&tracks, "pt-BR"), None);
    }

    #[test]
    fn auto_tag_matches_only_generated_track() {
        let tracks = vec![track("pt-BR", None), track("en", Some("asr"))];
        assert_eq!(select_track(&tracks, "pt-BR_auto"), None);
        assert_eq!(select_track(&tracks, "en_auto"), Some(&tracks[1]));
    }

    #[test]
    fn timed_text_is_decoded_and_cleaned() {
        let segments = parse_timed_text(TIMED_TEXT);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "Hello & welcome");
        assert_eq!(segments[0].start, 0.5);
        assert_eq!(segments[0].duration, 2.1);
        assert_eq!(segments[1].text, "it's great");
        assert_eq!(segments[2].text, "bye");
    }

    #[test]
    fn numeric_entities_are_decoded() {
        assert_eq!(decode_entities("caf&#233; &#x41;&lt;&gt;&quot;"), "café A<>\"");
        assert_eq!(decode_entities("&#xZZ; &bogus;"), "&#xZZ; &bogus;");
    }

    async fn provider_for(server: &MockServer) -> YoutubeTranscriptProvider {
        YoutubeTranscriptProvider::new(&TranscriptConfig {
            youtube_base_url: server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_selected_track() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .and(query_param("v", "dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_string(watch_page(
                r#"[{"baseUrl":"/api/timedtext?lang=en","languageCode":"en"}]"#,
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/timedtext"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TIMED_TEXT))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let segments = provider.fetch(&id, "en").await.unwrap();
        assert_eq!(segments.len(), 3);

        let err = provider.fetch(&id, "pt-BR").await.unwrap_err();
        assert!(matches!(err, FlowpipeError::TranscriptUnavailable(_)));
        assert!(err.to_string().contains("available: en"));
    }

    #[tokio::test]
    async fn missing_captions_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let err = provider_for(&server).await.fetch(&id, "en").await.unwrap_err();
        assert!(err.to_string().contains("disabled or unavailable"));
    }

    #[tokio::test]
    async fn watch_page_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let err = provider_for(&server).await.fetch(&id, "en").await.unwrap_err();
        assert!(matches!(err, FlowpipeError::UpstreamHttp { status: 429, .. }));
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = YoutubeTranscriptProvider::new(&TranscriptConfig {
            youtube_base_url: "not a url".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, FlowpipeError::Config(_)));
    }
}
