//! Configuration module for Skriv.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, WriterPrompts};
pub use settings::{
    AgentSettings, GeneralSettings, ModelSettings, PromptSettings, Settings, TranscriptSettings,
};
