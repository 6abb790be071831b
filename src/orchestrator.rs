//! Pipeline orchestrator for Skriv.
//!
//! Coordinates one request from input validation through transcript fetch to
//! the agent run. Every failure surfaces here as a single error; there is no
//! partial output.

use crate::agent::{self, AgentMessage, Post, RunItem, Runner, ToolContext};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SkrivError};
use crate::transcript::{TranscriptSource, YoutubeTranscripts};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// One content generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Video ID or URL.
    pub video_id: String,
    /// Optional free-form instruction replacing the default preamble.
    pub query: Option<String>,
    /// Target platforms; open strings, at least one required.
    pub platforms: Vec<String>,
    /// Caption language preference; empty means use the configured default.
    pub languages: Vec<String>,
}

impl GenerateRequest {
    pub fn new(video_id: impl Into<String>, platforms: &[String]) -> Self {
        Self {
            video_id: video_id.into(),
            query: None,
            platforms: platforms.to_vec(),
            languages: Vec::new(),
        }
    }

    /// Reject invalid input before any network call is made.
    pub fn validate(&self) -> Result<()> {
        if self.video_id.trim().is_empty() {
            return Err(SkrivError::InvalidInput(
                "Please enter a video ID".to_string(),
            ));
        }
        if self.platforms.is_empty() {
            return Err(SkrivError::InvalidInput(
                "No platform selected. Select at least one social media platform".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of one completed generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Generated posts, in the order the agent produced them.
    pub posts: Vec<Post>,
    /// Full item trace of the agent run.
    pub new_items: Vec<RunItem>,
    /// Number of model calls the run used.
    pub iterations: usize,
    /// Length of the fetched transcript in characters.
    pub transcript_chars: usize,
}

/// The main orchestrator for the Skriv pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    transcripts: Arc<dyn TranscriptSource>,
}

impl Orchestrator {
    /// Create a new orchestrator with default components.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts = Arc::new(YoutubeTranscripts::with_timeout(Duration::from_secs(
            settings.transcript.timeout_seconds,
        )));

        Ok(Self {
            settings,
            prompts,
            transcripts,
        })
    }

    /// Create an orchestrator with a custom transcript source.
    pub fn with_transcript_source(
        settings: Settings,
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptSource>,
    ) -> Self {
        Self {
            settings,
            prompts,
            transcripts,
        }
    }

    /// Run one request end to end: validate, fetch transcript, run the agent.
    ///
    /// The transcript feeds exactly one initial user message; nothing is
    /// cached or reused across runs.
    #[instrument(skip(self, request), fields(video_id = %request.video_id))]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult> {
        request.validate()?;

        let languages = if request.languages.is_empty() {
            self.settings.transcript.languages.clone()
        } else {
            request.languages.clone()
        };

        let transcript = self
            .transcripts
            .fetch_transcript(&request.video_id, &languages)
            .await?;
        info!("Fetched transcript ({} characters)", transcript.len());

        let message =
            build_request_message(request.query.as_deref(), &request.platforms, &transcript);
        let conversation = vec![AgentMessage::user(message)];

        let definition = agent::content_writer(&self.prompts, &self.settings.model.name);
        let tools = ToolContext::new(&self.settings.model, self.prompts.clone())?;
        let runner = Runner::new(definition, tools, &self.settings.model)?
            .with_max_iterations(self.settings.agent.max_iterations);

        let run = runner.run(&conversation).await?;
        info!(
            "Agent produced {} post(s) in {} iteration(s)",
            run.posts.len(),
            run.iterations
        );

        Ok(GenerateResult {
            posts: run.posts,
            new_items: run.new_items,
            iterations: run.iterations,
            transcript_chars: transcript.len(),
        })
    }
}

/// Build the initial user message from the query, platforms, and transcript.
///
/// Platforms are joined with " and ". A non-empty query replaces the default
/// preamble.
pub fn build_request_message(
    query: Option<&str>,
    platforms: &[String],
    transcript: &str,
) -> String {
    let platforms_str = platforms.join(" and ");
    match query {
        Some(q) if !q.trim().is_empty() => format!(
            "{} for {} based on this video transcript: {}",
            q.trim(),
            platforms_str,
            transcript
        ),
        _ => format!(
            "Generate {} posts based on this video transcript: {}",
            platforms_str, transcript
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platforms(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_request_message_default() {
        let msg = build_request_message(None, &platforms(&["LinkedIn", "Instagram"]), "Hello world");
        assert_eq!(
            msg,
            "Generate LinkedIn and Instagram posts based on this video transcript: Hello world"
        );
    }

    #[test]
    fn test_build_request_message_with_query() {
        let msg = build_request_message(
            Some("Write something funny"),
            &platforms(&["LinkedIn"]),
            "Hello world",
        );
        assert_eq!(
            msg,
            "Write something funny for LinkedIn based on this video transcript: Hello world"
        );
    }

    #[test]
    fn test_build_request_message_blank_query_uses_default() {
        let msg = build_request_message(Some("   "), &platforms(&["LinkedIn"]), "t");
        assert!(msg.starts_with("Generate LinkedIn posts"));
    }

    #[test]
    fn test_build_request_message_each_platform_once() {
        let selected = platforms(&["LinkedIn", "Instagram"]);
        let msg = build_request_message(None, &selected, "t");
        for p in &selected {
            assert_eq!(msg.matches(p.as_str()).count(), 1);
        }
        assert!(msg.contains("LinkedIn and Instagram"));
    }

    #[test]
    fn test_validate_rejects_empty_video_id() {
        let request = GenerateRequest::new("  ", &platforms(&["LinkedIn"]));
        let err = request.validate().unwrap_err();
        assert!(matches!(err, SkrivError::InvalidInput(_)));
        assert!(err.to_string().contains("video ID"));
    }

    #[test]
    fn test_validate_rejects_empty_platforms() {
        let request = GenerateRequest::new("abc123xyz00", &[]);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, SkrivError::InvalidInput(_)));
        assert!(err.to_string().contains("platform"));
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        let request = GenerateRequest::new("OZ5OZZZ2cvk", &platforms(&["LinkedIn"]));
        assert!(request.validate().is_ok());
    }
}
