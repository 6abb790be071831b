//! CLI module for Skriv.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skriv - Social Media Posts from Video Transcripts
///
/// A CLI tool that fetches a video's transcript and drafts platform-specific
/// social media posts with an LLM agent. The name "Skriv" comes from the
/// Norwegian/Scandinavian word for "write."
#[derive(Parser, Debug)]
#[command(name = "skriv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate social media posts from a video transcript
    Generate {
        /// YouTube video URL or ID
        video: String,

        /// Free-form instruction to steer the generated posts
        #[arg(short, long)]
        query: Option<String>,

        /// Target platform (repeat for multiple platforms)
        #[arg(
            short,
            long = "platform",
            default_values_t = vec!["LinkedIn".to_string(), "Instagram".to_string()]
        )]
        platforms: Vec<String>,

        /// Caption language preference (repeat for fallbacks)
        #[arg(short, long = "language")]
        languages: Vec<String>,

        /// Model to use for generation
        #[arg(short, long)]
        model: Option<String>,

        /// Directory to write one {platform}_post.txt file per post into
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fetch and print a video transcript
    Transcript {
        /// YouTube video URL or ID
        video: String,

        /// Caption language preference (repeat for fallbacks)
        #[arg(short, long = "language")]
        languages: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the web form and HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "model.name")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
