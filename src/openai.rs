//! Completion client configuration with sensible defaults.

use crate::config::ModelSettings;
use crate::error::{Result, SkrivError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a chat completions client for the configured endpoint.
///
/// The API key is read from the environment variable named in the settings,
/// once, at client construction. A missing or empty key is a configuration
/// error rather than a failed request later on.
pub fn create_client(model: &ModelSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = match std::env::var(&model.api_key_env) {
        Ok(key) if !key.is_empty() => key,
        _ => {
            return Err(SkrivError::Config(format!(
                "{} is not set. Set it with: export {}='...'",
                model.api_key_env, model.api_key_env
            )))
        }
    };

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(model.timeout_seconds))
        .build()
        .map_err(|e| SkrivError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(model.base_url.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
