//! Tool definitions and implementations for the content writer agent.

use crate::config::{ModelSettings, Prompts};
use crate::error::{Result, SkrivError};
use crate::openai::create_client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Draft one post for one platform from the transcript.
    GenerateContent {
        video_transcript: String,
        social_media_platform: String,
    },
}

/// Tool execution context with access to the completion endpoint.
pub struct ToolContext {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl ToolContext {
    /// Create a new tool context against the configured endpoint.
    pub fn new(model: &ModelSettings, prompts: Prompts) -> Result<Self> {
        Ok(Self {
            client: create_client(model)?,
            model: model.name.clone(),
            prompts,
        })
    }

    /// Execute a tool call and return the result as a string.
    ///
    /// Failures propagate to the caller and abort the enclosing agent run;
    /// there is no local recovery.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::GenerateContent {
                video_transcript,
                social_media_platform,
            } => {
                self.execute_generate_content(video_transcript, social_media_platform)
                    .await
            }
        }
    }

    async fn execute_generate_content(&self, transcript: &str, platform: &str) -> Result<String> {
        use async_openai::types::{
            ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
            CreateChatCompletionRequestArgs,
        };

        info!("Generating social media content for: {}", platform);

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        vars.insert("platform".to_string(), platform.to_string());
        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.writer.tool_user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| SkrivError::Tool(e.to_string()))?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| SkrivError::Tool(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SkrivError::OpenAI(format!("Content generation failed: {}", e)))?;

        // Raw first-choice text, no post-processing
        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| SkrivError::Tool("Empty content generation response".to_string()))
    }
}

/// Get the OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: "generate_content".to_string(),
            description: Some(
                "Generate a social media post for one platform from a video transcript. \
                Call this once per requested platform."
                    .to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "video_transcript": {
                        "type": "string",
                        "description": "The full video transcript"
                    },
                    "social_media_platform": {
                        "type": "string",
                        "description": "Target platform, e.g. LinkedIn or Instagram"
                    }
                },
                "required": ["video_transcript", "social_media_platform"]
            })),
            strict: None,
        },
    }]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| SkrivError::Tool(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "generate_content" => {
            let video_transcript = args["video_transcript"]
                .as_str()
                .ok_or_else(|| SkrivError::Tool("Missing 'video_transcript' argument".to_string()))?
                .to_string();
            let social_media_platform = args["social_media_platform"]
                .as_str()
                .ok_or_else(|| {
                    SkrivError::Tool("Missing 'social_media_platform' argument".to_string())
                })?
                .to_string();
            Ok(ToolCall::GenerateContent {
                video_transcript,
                social_media_platform,
            })
        }
        _ => Err(SkrivError::Tool(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_content_tool() {
        let tool = parse_tool_call(
            "generate_content",
            r#"{"video_transcript": "Hello world", "social_media_platform": "LinkedIn"}"#,
        )
        .unwrap();
        let ToolCall::GenerateContent {
            video_transcript,
            social_media_platform,
        } = tool;
        assert_eq!(video_transcript, "Hello world");
        assert_eq!(social_media_platform, "LinkedIn");
    }

    #[test]
    fn test_parse_tool_call_missing_argument() {
        let err = parse_tool_call("generate_content", r#"{"video_transcript": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("social_media_platform"));
    }

    #[test]
    fn test_parse_tool_call_unknown_tool() {
        let err = parse_tool_call("search_web", "{}").unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[test]
    fn test_tool_definitions_expose_generate_content() {
        let defs = tool_definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].function.name, "generate_content");
    }
}
