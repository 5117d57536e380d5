//! Video URL recognition and video-intent detection.
//!
//! Two policies live here and are enforced at two points by design:
//! the retriever filters video-hosting URLs out of non-video retrievals,
//! and the extractor independently skips video URLs outside a video
//! context in case a caller bypasses the retriever.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::SearchCategory;

/// Keywords that mark a question as explicitly video-related, regardless
/// of the classified category.
const VIDEO_KEYWORDS: &[&str] = &["video", "youtube", "watch", "clip", "footage"];

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]+)")
            .expect("video id pattern is valid")
    })
}

/// Extract the stable video identifier from a video-hosting URL.
pub fn video_id(url: &str) -> Option<String> {
    video_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether a URL belongs to a known video host.
pub fn is_video_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Whether a question should be treated as video-related.
///
/// True when the category is `videos` or the question contains an
/// explicit video keyword — the keyword check overrides the category,
/// because a web-classified query can still reference a specific video.
pub fn is_video_query(question: &str, category: SearchCategory) -> bool {
    if category == SearchCategory::Videos {
        return true;
    }
    let lowered = question.to_lowercase();
    VIDEO_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
