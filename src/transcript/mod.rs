//! Transcript retrieval for Skriv.
//!
//! Provides a trait-based interface for caption providers (currently YouTube).

mod youtube;

pub use youtube::YoutubeTranscripts;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single caption snippet as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    /// Spoken text of the snippet.
    pub text: String,
    /// Start time in seconds, if the provider reports one.
    pub start_seconds: Option<f64>,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_seconds: None,
        }
    }
}

/// Join snippets into one transcript string.
///
/// Snippet texts are joined with single spaces, in provider order. Empty
/// snippets are skipped so the result never contains doubled separators.
pub fn join_snippets(snippets: &[Snippet]) -> String {
    snippets
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the full transcript for a video.
    ///
    /// `languages` is an ordered preference list; the first available match
    /// wins. A single attempt is made, and any failure is terminal for the
    /// request - there is never a partially filled transcript.
    async fn fetch_transcript(&self, video_id: &str, languages: &[String]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_snippets_space_separated() {
        let snippets = vec![Snippet::new("Hello"), Snippet::new("world")];
        assert_eq!(join_snippets(&snippets), "Hello world");
    }

    #[test]
    fn test_join_snippets_skips_empty() {
        let snippets = vec![
            Snippet::new("one"),
            Snippet::new("  "),
            Snippet::new("two\n"),
        ];
        assert_eq!(join_snippets(&snippets), "one two");
    }

    #[test]
    fn test_join_snippets_empty_input() {
        assert_eq!(join_snippets(&[]), "");
    }
}
