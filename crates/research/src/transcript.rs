//! Video transcript capability.
//!
//! Given a video identifier, discovers the available caption tracks from
//! the watch page's embedded player response, fetches one as timed text
//! entries, and concatenates them into a single tagged blob.
//!
//! Selection policy: prefer an English track; otherwise take any
//! translatable track and request machine translation to English; if
//! neither works, yield nothing rather than failing the pipeline.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

use crate::text::clean_fragment;

/// Marker prefixed to transcript blobs so downstream synthesis can weight
/// spoken content appropriately.
const TRANSCRIPT_MARKER: &str = "[Transcript]";

/// One caption track advertised by the player response.
#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    #[serde(rename = "isTranslatable", default)]
    is_translatable: bool,
}

/// Timed-text payload in the provider's `json3` format.
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedEvent {
    #[serde(default)]
    segs: Vec<TextSegment>,
}

#[derive(Debug, Deserialize)]
struct TextSegment {
    #[serde(default)]
    utf8: String,
}

fn caption_tracks_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""captionTracks":(\[.*?\])"#).expect("caption tracks pattern is valid")
    })
}

/// HTTP client for the transcript capability.
pub struct TranscriptClient {
    http: reqwest::Client,
}

impl TranscriptClient {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0")
            .build()
            .unwrap_or_default();

        Self { http }
    }

    /// Fetch an English transcript for a video, or `None` if no usable
    /// track exists or any step fails.
    pub async fn fetch(&self, video_id: &str) -> Option<String> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);

        let page = match self.http.get(&watch_url).send().await {
            Ok(response) => response.text().await.ok()?,
            Err(e) => {
                tracing::warn!("Failed to load watch page for {}: {}", video_id, e);
                return None;
            }
        };

        let tracks = caption_tracks(&page);
        if tracks.is_empty() {
            tracing::debug!("No caption tracks for video {}", video_id);
            return None;
        }

        let track_url = select_track_url(&tracks)?;

        let timed_text: TimedText = match self
            .http
            .get(format!("{}&fmt=json3", track_url))
            .send()
            .await
        {
            Ok(response) => response.json().await.ok()?,
            Err(e) => {
                tracing::warn!("Failed to fetch transcript for {}: {}", video_id, e);
                return None;
            }
        };

        let text = join_events(&timed_text);
        if text.is_empty() {
            return None;
        }

        Some(format!("{} {}", TRANSCRIPT_MARKER, text))
    }
}

/// Parse the caption track list out of a watch page.
fn caption_tracks(page: &str) -> Vec<CaptionTrack> {
    caption_tracks_pattern()
        .captures(page)
        .and_then(|caps| caps.get(1))
        .and_then(|m| serde_json::from_str(m.as_str()).ok())
        .unwrap_or_default()
}

/// Pick the track URL per the selection policy.
///
/// English first; otherwise the first translatable track with `tlang=en`
/// appended so the provider machine-translates it.
fn select_track_url(tracks: &[CaptionTrack]) -> Option<String> {
    if let Some(track) = tracks
        .iter()
        .find(|t| t.language_code == "en" || t.language_code.starts_with("en-"))
    {
        return Some(track.base_url.clone());
    }

    tracks
        .iter()
        .find(|t| t.is_translatable)
        .map(|t| format!("{}&tlang=en", t.base_url))
}

/// Concatenate timed entries into one normalized blob.
fn join_events(timed_text: &TimedText) -> String {
    let fragments: Vec<String> = timed_text
        .events
        .iter()
        .flat_map(|event| event.segs.iter())
        .map(|seg| clean_fragment(&seg.utf8))
        .filter(|text| !text.is_empty())
        .collect();

    fragments.join(" ")
}
