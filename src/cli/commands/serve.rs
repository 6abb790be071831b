//! Web form and HTTP API for content generation.
//!
//! Serves a single-page form that mirrors the CLI generate command, plus a
//! JSON endpoint for integration with other systems.

use crate::agent::Post;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::SkrivError;
use crate::orchestrator::{GenerateRequest, Orchestrator};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

/// Run the HTTP server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Generate, &settings.model) {
        Output::error(&format!("{}", e));
        Output::info("Run 'skriv doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;

    let state = Arc::new(AppState { orchestrator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Skriv Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Form", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate", "POST /api/generate");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ApiGenerateRequest {
    /// YouTube video URL or ID
    video_id: String,
    /// Optional free-form instruction
    #[serde(default)]
    query: Option<String>,
    /// Target platforms; at least one required
    #[serde(default)]
    platforms: Vec<String>,
    /// Caption language preference; defaults from configuration
    #[serde(default)]
    languages: Vec<String>,
}

#[derive(Serialize)]
struct ApiGenerateResponse {
    posts: Vec<Post>,
    iterations: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApiGenerateRequest>,
) -> impl IntoResponse {
    let request = GenerateRequest {
        video_id: req.video_id,
        query: req.query,
        platforms: req.platforms,
        languages: req.languages,
    };

    match state.orchestrator.generate(&request).await {
        Ok(result) => Json(ApiGenerateResponse {
            posts: result.posts,
            iterations: result.iterations,
        })
        .into_response(),
        Err(e) => (
            error_status(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Map pipeline failures to HTTP statuses.
fn error_status(error: &SkrivError) -> StatusCode {
    match error {
        SkrivError::InvalidInput(_) | SkrivError::InvalidVideoId(_) => StatusCode::BAD_REQUEST,
        SkrivError::NoTranscriptFound { .. }
        | SkrivError::VideoUnavailable(_)
        | SkrivError::TranscriptsDisabled(_) => StatusCode::NOT_FOUND,
        SkrivError::TranscriptRetrieval(_) | SkrivError::OpenAI(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The form page. Posts to /api/generate and renders one expandable panel
/// per generated post, each with a plain-text download.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Skriv - Social Media Content Generator</title>
<style>
  body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin: 0.75rem 0 0.25rem; font-weight: bold; }
  input[type=text], textarea { width: 100%; padding: 0.4rem; box-sizing: border-box; }
  fieldset { margin-top: 1rem; }
  fieldset label { display: inline; font-weight: normal; margin-right: 1rem; }
  button { margin-top: 1rem; padding: 0.5rem 1.25rem; }
  details { border: 1px solid #ccc; border-radius: 4px; margin-top: 1rem; padding: 0.5rem 1rem; }
  details pre { white-space: pre-wrap; }
  .error { color: #b00020; margin-top: 1rem; }
  .hint { color: #666; font-size: 0.85rem; }
</style>
</head>
<body>
<h1>Social Media Content Generator</h1>
<p>This app generates social media content based on YouTube video transcripts.
Enter a YouTube video ID and your query to generate content for different platforms.</p>

<form id="generate-form">
  <label for="video-id">YouTube Video ID</label>
  <input type="text" id="video-id" placeholder="e.g., OZ5OZZZ2cvk">
  <p class="hint">The ID is the part after 'v=' in a YouTube URL. Full URLs work too.</p>

  <label for="query">Your Query</label>
  <textarea id="query" rows="3"
    placeholder="e.g., Generate a LinkedIn post and an Instagram caption based on this video"></textarea>

  <fieldset>
    <legend>Select Platforms</legend>
    <label><input type="checkbox" name="platform" value="LinkedIn" checked> LinkedIn</label>
    <label><input type="checkbox" name="platform" value="Instagram" checked> Instagram</label>
  </fieldset>

  <button type="submit">Generate Content</button>
</form>

<p id="status"></p>
<div id="error" class="error"></div>
<div id="results"></div>

<script>
const form = document.getElementById('generate-form');
const status = document.getElementById('status');
const errorBox = document.getElementById('error');
const results = document.getElementById('results');

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  errorBox.textContent = '';
  results.innerHTML = '';

  const videoId = document.getElementById('video-id').value.trim();
  const query = document.getElementById('query').value.trim();
  const platforms = Array.from(
    document.querySelectorAll('input[name="platform"]:checked')
  ).map((box) => box.value);

  if (!videoId) {
    errorBox.textContent = 'Please enter a YouTube Video ID';
    return;
  }
  if (platforms.length === 0) {
    errorBox.textContent = 'Please select at least one social media platform';
    return;
  }

  status.textContent = 'Generating content... This may take a minute or two.';
  try {
    const response = await fetch('/api/generate', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ video_id: videoId, query: query || null, platforms }),
    });
    const body = await response.json();
    if (!response.ok) {
      errorBox.textContent = 'Error: ' + body.error;
      return;
    }
    for (const post of body.posts) {
      renderPost(post);
    }
  } catch (err) {
    errorBox.textContent = 'Error: ' + err;
  } finally {
    status.textContent = '';
  }
});

function renderPost(post) {
  const details = document.createElement('details');
  details.open = true;

  const summary = document.createElement('summary');
  summary.textContent = post.platform + ' Post';

  const content = document.createElement('pre');
  content.textContent = post.content;

  const download = document.createElement('a');
  download.textContent = 'Download ' + post.platform + ' Content';
  download.href = URL.createObjectURL(new Blob([post.content], { type: 'text/plain' }));
  download.download = post.platform.toLowerCase() + '_post.txt';

  details.append(summary, content, download);
  results.append(details);
}
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let validation = SkrivError::InvalidInput("no platform selected".to_string());
        assert_eq!(error_status(&validation), StatusCode::BAD_REQUEST);

        let missing = SkrivError::TranscriptsDisabled("xyz".to_string());
        assert_eq!(error_status(&missing), StatusCode::NOT_FOUND);

        let upstream = SkrivError::OpenAI("timeout".to_string());
        assert_eq!(error_status(&upstream), StatusCode::BAD_GATEWAY);
    }
}
