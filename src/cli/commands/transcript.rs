//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{TranscriptSource, YoutubeTranscripts};
use anyhow::Result;
use std::time::Duration;

/// Run the transcript command.
pub async fn run_transcript(
    video: &str,
    languages: Vec<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let languages = if languages.is_empty() {
        settings.transcript.languages.clone()
    } else {
        languages
    };

    let source = YoutubeTranscripts::with_timeout(Duration::from_secs(
        settings.transcript.timeout_seconds,
    ));

    let spinner = Output::spinner("Fetching transcript...");

    let transcript = match source.fetch_transcript(video, &languages).await {
        Ok(transcript) => {
            spinner.finish_and_clear();
            transcript
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Error: {}", e));
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, &transcript)?;
            Output::success(&format!(
                "Wrote transcript ({} characters) to {}",
                transcript.len(),
                path.display()
            ));
        }
        None => {
            println!("{}", transcript);
        }
    }

    Ok(())
}
