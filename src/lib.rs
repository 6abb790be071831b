//! Skriv - Social Media Posts from Video Transcripts
//!
//! A CLI tool that fetches a video's transcript and drafts platform-specific
//! social media posts with an LLM agent.
//!
//! The name "Skriv" comes from the Norwegian/Scandinavian word for "write."
//!
//! # Overview
//!
//! Skriv allows you to:
//! - Fetch the caption transcript of a YouTube video
//! - Generate posts for one or more social media platforms from it
//! - Serve a small web form that does the same thing in a browser
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt management
//! - `transcript` - Transcript retrieval from caption providers
//! - `agent` - Content writer agent, its tool, and the run loop
//! - `orchestrator` - Pipeline coordination from request to posts
//!
//! # Example
//!
//! ```rust,no_run
//! use skriv::config::Settings;
//! use skriv::orchestrator::{GenerateRequest, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let request = GenerateRequest::new("OZ5OZZZ2cvk", &["LinkedIn".to_string()]);
//!     let result = orchestrator.generate(&request).await?;
//!     for post in &result.posts {
//!         println!("[{}]\n{}", post.platform, post.content);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod transcript;

pub use error::{Result, SkrivError};
