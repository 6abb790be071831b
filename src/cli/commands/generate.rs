//! Generate command implementation.

use crate::agent::RunItem;
use crate::cli::output::content_preview;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{GenerateRequest, Orchestrator};
use anyhow::Result;

/// Run the generate command.
pub async fn run_generate(
    video: &str,
    query: Option<String>,
    platforms: Vec<String>,
    languages: Vec<String>,
    model: Option<String>,
    output: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate, &settings.model) {
        Output::error(&format!("{}", e));
        Output::info("Run 'skriv doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.model.name = model;
    }

    let request = GenerateRequest {
        video_id: video.to_string(),
        query,
        platforms,
        languages,
    };

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Generating content... This may take a minute or two.");

    let result = match orchestrator.generate(&request).await {
        Ok(result) => {
            spinner.finish_and_clear();
            result
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Error: {}", e));
            return Err(e.into());
        }
    };

    for post in &result.posts {
        Output::header(&format!("{} Post", post.platform));
        println!("\n{}\n", post.content);
    }

    // Write one downloadable text artifact per post
    if let Some(dir) = output {
        let dir = Settings::expand_path(&dir);
        std::fs::create_dir_all(&dir)?;
        for post in &result.posts {
            let path = dir.join(post_filename(&post.platform));
            std::fs::write(&path, &post.content)?;
            Output::success(&format!("Wrote {}", path.display()));
        }
    }

    // Show tool calls summary
    let tool_calls: Vec<_> = result
        .new_items
        .iter()
        .filter_map(|item| match item {
            RunItem::ToolCall { name, arguments } => Some((name, arguments)),
            _ => None,
        })
        .collect();

    if !tool_calls.is_empty() {
        Output::header(&format!("Tool calls ({})", tool_calls.len()));
        for (name, arguments) in tool_calls {
            Output::info(&format!("  {} {}", name, content_preview(arguments, 60)));
        }
        println!();
    }

    Output::info(&format!(
        "Completed in {} iteration(s) from a {} character transcript",
        result.iterations, result.transcript_chars
    ));

    Ok(())
}

/// File name for a downloaded post, e.g. "linkedin_post.txt".
fn post_filename(platform: &str) -> String {
    format!("{}_post.txt", platform.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_filename_lowercases_platform() {
        assert_eq!(post_filename("LinkedIn"), "linkedin_post.txt");
        assert_eq!(post_filename("Instagram"), "instagram_post.txt");
    }
}
