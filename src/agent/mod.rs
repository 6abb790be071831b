//! Content writer agent: definition, conversation types, tool, and run loop.

mod output;
mod runner;
mod tools;

pub use output::{parse_posts, Post};
pub use runner::{AgentRunResult, RunItem, Runner};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};

use crate::config::Prompts;
use serde::{Deserialize, Serialize};

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// One message of an agent conversation.
///
/// Conversations are ordered and append-only; messages are never mutated
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: Role,
    pub content: String,
}

impl AgentMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Immutable configuration of one agent.
///
/// A definition is a plain value: a name, natural-language instructions, and
/// the model that runs them. The runner consumes a definition together with
/// the tool context; nothing here talks to the network.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub instructions: String,
    pub model: String,
}

/// Build the content writer agent definition.
pub fn content_writer(prompts: &Prompts, model: &str) -> AgentDefinition {
    AgentDefinition {
        name: "Content Writer Agent".to_string(),
        instructions: prompts.writer.instructions.clone(),
        model: model.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_writer_definition() {
        let prompts = Prompts::default();
        let agent = content_writer(&prompts, "gemini-2.0-flash");
        assert_eq!(agent.name, "Content Writer Agent");
        assert_eq!(agent.model, "gemini-2.0-flash");
        assert!(agent.instructions.contains("content writer"));
    }

    #[test]
    fn test_message_constructors() {
        let msg = AgentMessage::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
    }
}
