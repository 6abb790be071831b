//! Prompt templates for Skriv.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub writer: WriterPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for the content writer agent and its tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterPrompts {
    pub instructions: String,
    pub tool_user: String,
}

impl Default for WriterPrompts {
    fn default() -> Self {
        Self {
            instructions: r#"You are a talented content writer who writes engaging, humorous, informative and highly readable social media posts.
You will be given a video transcript and social media platforms.
You will generate a social media post based on the video transcript and the social media platforms.
You may search the web for up-to-date information on the topic and fill in some useful details if needed.

Use the generate_content tool to draft a post for each requested platform.

When you are done, reply with a single JSON object of the form:
{"response": [{"platform": "<platform name>", "content": "<post text>"}, ...]}
with one entry per requested platform, and nothing else."#
                .to_string(),

            tool_user: r#"Here is a new video transcript:
{{transcript}}

Generate a social media post on my {{platform}} based on my provided video transcript.
"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load writer prompts if file exists
            let writer_path = custom_path.join("writer.toml");
            if writer_path.exists() {
                let content = std::fs::read_to_string(&writer_path)?;
                prompts.writer = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        // Start with custom variables, then override with provided vars
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.writer.instructions.is_empty());
        assert!(prompts.writer.tool_user.contains("{{transcript}}"));
        assert!(prompts.writer.tool_user.contains("{{platform}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }
}
