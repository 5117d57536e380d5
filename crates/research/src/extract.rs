//! Content extraction: URL → normalized plain text.
//!
//! Extraction never fails; any fetch, parse, or transcript error yields
//! an empty document so one bad URL cannot abort a retrieval batch.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::text::clean_fragment;
use crate::transcript::TranscriptClient;
use crate::types::ExtractedDocument;
use crate::video::video_id;

/// Trait for the content-extraction capability.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract normalized text from a URL.
    ///
    /// `video_context` signals that the current question is video-related;
    /// only then is the transcript path taken for video URLs.
    async fn extract(&self, url: &str, video_context: bool) -> ExtractedDocument;
}

/// Default extractor: video transcripts for video URLs, paragraph text
/// for everything else.
pub struct ContentExtractor {
    http: reqwest::Client,
    transcripts: TranscriptClient,
}

impl ContentExtractor {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0")
            .build()
            .unwrap_or_default();

        Self {
            http,
            transcripts: TranscriptClient::new(timeout),
        }
    }

    async fn extract_page(&self, url: &str) -> ExtractedDocument {
        let body = match self.http.get(url).send().await {
            Ok(response) => match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read body from {}: {}", url, e);
                    return ExtractedDocument::empty();
                }
            },
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                return ExtractedDocument::empty();
            }
        };

        ExtractedDocument::from_page(paragraphs_from_html(&body))
    }
}

#[async_trait]
impl Extractor for ContentExtractor {
    async fn extract(&self, url: &str, video_context: bool) -> ExtractedDocument {
        if let Some(id) = video_id(url) {
            // Second enforcement point for the video policy: a video URL
            // outside a video context is not fetched at all, even if a
            // caller bypassed the retriever's filter.
            if !video_context {
                tracing::debug!("Skipping video URL outside video context: {}", url);
                return ExtractedDocument::empty();
            }

            return match self.transcripts.fetch(&id).await {
                Some(transcript) => ExtractedDocument::from_transcript(transcript),
                None => ExtractedDocument::empty(),
            };
        }

        self.extract_page(url).await
    }
}

/// Concatenate the normalized text of all paragraph elements.
pub(crate) fn paragraphs_from_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraph = Selector::parse("p").expect("'p' is a valid selector");

    let fragments: Vec<String> = document
        .select(&paragraph)
        .map(|el| clean_fragment(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    fragments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_from_html() {
        let html = r#"
            <html><body>
                <h1>Heading is ignored</h1>
                <p>First paragraph.</p>
                <div><p>Nested <b>second</b> paragraph.</p></div>
                <p>   </p>
            </body></html>
        "#;

        assert_eq!(
            paragraphs_from_html(html),
            "First paragraph. Nested second paragraph."
        );
    }

    #[test]
    fn test_paragraphs_normalize_characters() {
        let html = r#"<p>She said "hello"
and left</p>"#;
        assert_eq!(paragraphs_from_html(html), "She said 'hello' and left");
    }

    #[test]
    fn test_paragraphs_from_empty_document() {
        assert_eq!(paragraphs_from_html("<html></html>"), "");
        assert_eq!(paragraphs_from_html("not markup at all"), "");
    }

    #[tokio::test]
    async fn test_video_url_outside_video_context_is_skipped() {
        // Must return empty without touching the network: the URL is a
        // recognizable video URL and the context is not video.
        let extractor = ContentExtractor::new(Duration::from_millis(50));
        let doc = extractor
            .extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ", false)
            .await;

        assert!(doc.is_empty());
        assert!(!doc.from_transcript);
    }

    #[tokio::test]
    async fn test_generic_url_never_takes_transcript_path() {
        // Even in a video context, a URL without a video id goes through
        // page extraction, so the resulting document is never
        // transcript-tagged.
        let extractor = ContentExtractor::new(Duration::from_millis(50));
        let doc = extractor.extract("http://127.0.0.1:9/article", true).await;

        assert!(!doc.from_transcript);
    }

    #[tokio::test]
    async fn test_unreachable_url_yields_empty_document() {
        let extractor = ContentExtractor::new(Duration::from_millis(50));
        // Connection refused locally; no external traffic
        let doc = extractor.extract("http://127.0.0.1:9/none", false).await;

        assert!(doc.is_empty());
    }
}
