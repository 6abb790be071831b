//! Error types for Skriv.

use thiserror::Error;

/// Library-level error type for Skriv operations.
#[derive(Error, Debug)]
pub enum SkrivError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No transcript found for video {video_id} in languages: {languages:?}")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Video {0} is unavailable")]
    VideoUnavailable(String),

    #[error("Invalid video ID: {0}")]
    InvalidVideoId(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("Could not retrieve transcript: {0}")]
    TranscriptRetrieval(String),

    #[error("Tool invocation failed: {0}")]
    Tool(String),

    #[error("Model API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Could not parse agent output: {0}")]
    OutputParse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Skriv operations.
pub type Result<T> = std::result::Result<T, SkrivError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_error_messages_carry_the_video_id() {
        let err = SkrivError::TranscriptsDisabled("xyz".to_string());
        assert_eq!(err.to_string(), "Transcripts are disabled for video xyz");

        let err = SkrivError::VideoUnavailable("abc123".to_string());
        assert_eq!(err.to_string(), "Video abc123 is unavailable");

        let err = SkrivError::NoTranscriptFound {
            video_id: "abc123".to_string(),
            languages: vec!["en".to_string(), "no".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("en"));
        assert!(msg.contains("no"));
    }
}
