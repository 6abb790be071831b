//! YouTube caption provider.
//!
//! Talks to the public player endpoint to list a video's caption tracks,
//! picks one by language preference, and fetches it in json3 format.

use super::{join_snippets, Snippet, TranscriptSource};
use crate::error::{Result, SkrivError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";

/// Client version sent with player requests. The endpoint rejects requests
/// without a known client context.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

/// YouTube transcript source.
pub struct YoutubeTranscripts {
    http: reqwest::Client,
    video_id_regex: Regex,
}

impl YoutubeTranscripts {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a source with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self {
            http,
            video_id_regex,
        }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    /// Look up the video's caption track list via the player endpoint.
    async fn fetch_caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .http
            .post(PLAYER_ENDPOINT)
            .json(&body)
            .send()
            .await
            .map_err(|e| SkrivError::TranscriptRetrieval(format!("player request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SkrivError::TranscriptRetrieval(format!(
                "player request for video {} returned HTTP {}",
                video_id,
                response.status()
            )));
        }

        let player: PlayerResponse = response.json().await.map_err(|e| {
            SkrivError::TranscriptRetrieval(format!("failed to parse player response: {}", e))
        })?;

        caption_tracks(player, video_id)
    }

    /// Fetch one caption track in json3 format and flatten it to snippets.
    async fn fetch_track(&self, track: &CaptionTrack, video_id: &str) -> Result<Vec<Snippet>> {
        let mut track_url = url::Url::parse(&track.base_url).map_err(|e| {
            SkrivError::TranscriptRetrieval(format!("invalid caption track URL: {}", e))
        })?;
        track_url.query_pairs_mut().append_pair("fmt", "json3");

        debug!("Fetching {} captions for video {}", track.language_code, video_id);

        let response = self
            .http
            .get(track_url)
            .send()
            .await
            .map_err(|e| SkrivError::TranscriptRetrieval(format!("caption request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SkrivError::TranscriptRetrieval(format!(
                "caption request for video {} returned HTTP {}",
                video_id,
                response.status()
            )));
        }

        let timed_text: TimedText = response.json().await.map_err(|e| {
            SkrivError::TranscriptRetrieval(format!("failed to parse caption track: {}", e))
        })?;

        Ok(snippets_from_events(timed_text.events))
    }
}

impl Default for YoutubeTranscripts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch_transcript(&self, video_id: &str, languages: &[String]) -> Result<String> {
        let video_id = self
            .extract_video_id(video_id)
            .ok_or_else(|| SkrivError::InvalidVideoId(video_id.to_string()))?;

        let tracks = self.fetch_caption_tracks(&video_id).await?;

        let track = select_track(&tracks, languages).ok_or_else(|| {
            SkrivError::NoTranscriptFound {
                video_id: video_id.clone(),
                languages: languages.to_vec(),
            }
        })?;

        let snippets = self.fetch_track(track, &video_id).await?;
        Ok(join_snippets(&snippets))
    }
}

// === Player response subset ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    caption_tracks: Option<Vec<CaptionTrack>>,
}

/// One entry of the video's caption track list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// "asr" marks auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn matches_language(&self, language: &str) -> bool {
        self.language_code == language
            || self
                .language_code
                .strip_prefix(language)
                .is_some_and(|rest| rest.starts_with('-'))
    }
}

/// Classify the player response into a track list or a typed failure.
///
/// The distinction is decided here, at the provider boundary: an errored
/// playability status means the video itself is gone, while a playable video
/// with no caption tracks means the owner disabled transcripts.
fn caption_tracks(player: PlayerResponse, video_id: &str) -> Result<Vec<CaptionTrack>> {
    if let Some(status) = &player.playability_status {
        match status.status.as_deref() {
            Some("ERROR") | Some("LOGIN_REQUIRED") | Some("UNPLAYABLE") => {
                return Err(SkrivError::VideoUnavailable(video_id.to_string()));
            }
            _ => {}
        }
    }

    let tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(SkrivError::TranscriptsDisabled(video_id.to_string()));
    }

    Ok(tracks)
}

/// Pick the first track matching the language preference order.
///
/// Within one language, manually created tracks win over auto-generated ones.
/// Language codes match exactly or by prefix, so "en" also finds "en-US".
fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    for language in languages {
        let mut candidates: Vec<&CaptionTrack> = tracks
            .iter()
            .filter(|t| t.matches_language(language))
            .collect();
        candidates.sort_by_key(|t| t.is_generated());
        if let Some(track) = candidates.into_iter().next() {
            return Some(track);
        }
    }
    None
}

// === json3 caption format subset ===

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(default, rename = "tStartMs")]
    start_ms: Option<u64>,
    #[serde(default)]
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Flatten json3 events into snippets, preserving event order.
fn snippets_from_events(events: Vec<TimedTextEvent>) -> Vec<Snippet> {
    events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text: String = segs.into_iter().map(|s| s.utf8).collect();
            let text = text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(Snippet {
                text,
                start_seconds: event.start_ms.map(|ms| ms as f64 / 1000.0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(language_code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://www.youtube.com/api/timedtext?lang={}", language_code),
            language_code: language_code.to_string(),
            kind: kind.map(|k| k.to_string()),
        }
    }

    #[test]
    fn test_extract_video_id() {
        let source = YoutubeTranscripts::new();

        // Test various URL formats
        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );

        // Test invalid inputs
        assert_eq!(source.extract_video_id("not-a-video-id"), None);
        assert_eq!(source.extract_video_id(""), None);
    }

    #[test]
    fn test_select_track_prefers_language_order() {
        let tracks = vec![track("de", None), track("en", None)];
        let selected = select_track(&tracks, &["en".to_string(), "de".to_string()]).unwrap();
        assert_eq!(selected.language_code, "en");
    }

    #[test]
    fn test_select_track_prefers_manual_over_generated() {
        let tracks = vec![track("en", Some("asr")), track("en", None)];
        let selected = select_track(&tracks, &["en".to_string()]).unwrap();
        assert!(!selected.is_generated());
    }

    #[test]
    fn test_select_track_matches_region_variants() {
        let tracks = vec![track("en-US", Some("asr"))];
        let selected = select_track(&tracks, &["en".to_string()]);
        assert!(selected.is_some());

        // But "en" must not match "english"-unrelated codes like "es"
        let tracks = vec![track("es", None)];
        assert!(select_track(&tracks, &["e".to_string()]).is_none());
    }

    #[test]
    fn test_select_track_no_match() {
        let tracks = vec![track("de", None)];
        assert!(select_track(&tracks, &["en".to_string()]).is_none());
    }

    #[test]
    fn test_caption_tracks_unavailable_video() {
        let player: PlayerResponse = serde_json::from_str(
            r#"{"playabilityStatus": {"status": "ERROR", "reason": "Video unavailable"}}"#,
        )
        .unwrap();

        let err = caption_tracks(player, "abc123").unwrap_err();
        assert!(matches!(err, SkrivError::VideoUnavailable(_)));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_caption_tracks_disabled() {
        let player: PlayerResponse =
            serde_json::from_str(r#"{"playabilityStatus": {"status": "OK"}}"#).unwrap();

        let err = caption_tracks(player, "xyz").unwrap_err();
        assert_eq!(err.to_string(), "Transcripts are disabled for video xyz");
    }

    #[test]
    fn test_caption_tracks_present() {
        let player: PlayerResponse = serde_json::from_str(
            r#"{
                "playabilityStatus": {"status": "OK"},
                "captions": {
                    "playerCaptionsTracklistRenderer": {
                        "captionTracks": [
                            {"baseUrl": "https://example.com/t", "languageCode": "en", "kind": "asr"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let tracks = caption_tracks(player, "abc123").unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "en");
    }

    #[test]
    fn test_snippets_from_events() {
        let timed_text: TimedText = serde_json::from_str(
            r#"{
                "events": [
                    {"tStartMs": 0, "segs": [{"utf8": "Hello"}]},
                    {"tStartMs": 1200},
                    {"tStartMs": 2400, "segs": [{"utf8": "wor"}, {"utf8": "ld"}]},
                    {"tStartMs": 3000, "segs": [{"utf8": "\n"}]}
                ]
            }"#,
        )
        .unwrap();

        let snippets = snippets_from_events(timed_text.events);
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "Hello");
        assert_eq!(snippets[0].start_seconds, Some(0.0));
        assert_eq!(snippets[1].text, "world");
        assert_eq!(join_snippets(&snippets), "Hello world");
    }
}
