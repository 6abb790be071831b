//! Agent runner with tool calling loop.

use super::output::{parse_posts, Post};
use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use super::{AgentDefinition, AgentMessage, Role};
use crate::config::ModelSettings;
use crate::error::{Result, SkrivError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// Runs one agent to completion against a conversation.
pub struct Runner {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    definition: AgentDefinition,
    tools: ToolContext,
    max_iterations: usize,
}

impl Runner {
    /// Create a new runner for the given agent definition.
    pub fn new(definition: AgentDefinition, tools: ToolContext, model: &ModelSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(model)?,
            definition,
            tools,
            max_iterations: 10,
        })
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent over a conversation until it produces a final answer.
    ///
    /// The final assistant text must conform to the declared output shape
    /// (an ordered list of posts); a nonconforming answer fails the run.
    /// Tool and model failures are terminal - no partial results.
    pub async fn run(&self, conversation: &[AgentMessage]) -> Result<AgentRunResult> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.definition.instructions.clone())
                .build()
                .map_err(|e| SkrivError::Agent(e.to_string()))?
                .into(),
        ];
        for message in conversation {
            messages.push(to_request_message(message)?);
        }

        let mut new_items = Vec::new();
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SkrivError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.definition.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| SkrivError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| SkrivError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| SkrivError::Agent("No response from model".to_string()))?;

            match &choice.message.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    // Add assistant message with tool calls to history
                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| SkrivError::Agent(e.to_string()))?;
                    messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let name = tool_call.function.name.clone();
                        let arguments = tool_call.function.arguments.clone();
                        info!("Agent calling tool: {}", name);

                        new_items.push(RunItem::ToolCall {
                            name: name.clone(),
                            arguments: arguments.clone(),
                        });

                        let tool = parse_tool_call(&name, &arguments)?;
                        let output = self.tools.execute(&tool).await?;

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(output.clone())
                            .build()
                            .map_err(|e| SkrivError::Agent(e.to_string()))?;
                        messages.push(tool_msg.into());

                        new_items.push(RunItem::ToolOutput { name, output });
                    }
                }
                _ => {
                    // No tool calls - this is the final answer
                    let content = choice.message.content.clone().unwrap_or_default();
                    new_items.push(RunItem::Message {
                        role: Role::Assistant,
                        content,
                    });

                    let run = AgentRunResult {
                        new_items,
                        posts: Vec::new(),
                        iterations,
                    };
                    let posts = parse_posts(&run.text_message_outputs())?;
                    return Ok(AgentRunResult { posts, ..run });
                }
            }
        }
    }
}

/// Convert a conversation message into the request format.
fn to_request_message(message: &AgentMessage) -> Result<ChatCompletionRequestMessage> {
    match message.role {
        Role::User => Ok(ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(|e| SkrivError::Agent(e.to_string()))?
            .into()),
        Role::Assistant => Ok(ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(|e| SkrivError::Agent(e.to_string()))?
            .into()),
        // Tool results carry call IDs the caller does not have
        Role::Tool => Err(SkrivError::Agent(
            "Tool messages cannot be supplied in the initial conversation".to_string(),
        )),
    }
}

/// One item generated during a run, in production order.
#[derive(Debug, Clone)]
pub enum RunItem {
    /// A conversational message.
    Message { role: Role, content: String },
    /// The agent invoked a tool.
    ToolCall { name: String, arguments: String },
    /// A tool returned output to the agent.
    ToolOutput { name: String, output: String },
}

/// Result of one complete agent run.
#[derive(Debug)]
pub struct AgentRunResult {
    /// Everything the run produced, in order: messages, tool calls, tool
    /// outputs, ending with the final assistant message.
    pub new_items: Vec<RunItem>,
    /// The final answer, validated against the declared output shape.
    pub posts: Vec<Post>,
    /// Number of model calls used.
    pub iterations: usize,
}

impl AgentRunResult {
    /// Join the textual content of all non-tool message items.
    ///
    /// This is how the final JSON payload is recovered from the item trace.
    pub fn text_message_outputs(&self) -> String {
        self.new_items
            .iter()
            .filter_map(|item| match item {
                RunItem::Message { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Count of tool calls made during the run.
    pub fn tool_calls(&self) -> usize {
        self.new_items
            .iter()
            .filter(|item| matches!(item, RunItem::ToolCall { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_outputs_skips_tool_items() {
        let result = AgentRunResult {
            new_items: vec![
                RunItem::ToolCall {
                    name: "generate_content".to_string(),
                    arguments: "{}".to_string(),
                },
                RunItem::ToolOutput {
                    name: "generate_content".to_string(),
                    output: "A post".to_string(),
                },
                RunItem::Message {
                    role: Role::Assistant,
                    content: r#"{"response": []}"#.to_string(),
                },
            ],
            posts: Vec::new(),
            iterations: 2,
        };

        assert_eq!(result.text_message_outputs(), r#"{"response": []}"#);
        assert_eq!(result.tool_calls(), 1);
    }

    #[test]
    fn test_tool_role_rejected_in_initial_conversation() {
        let message = AgentMessage {
            role: Role::Tool,
            content: "output".to_string(),
        };
        assert!(to_request_message(&message).is_err());
    }
}
