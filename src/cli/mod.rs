//! CLI module for Les.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Les - Study Assistant for PDFs and Videos
///
/// A CLI tool that turns training material into summaries, quizzes,
/// scenarios, and an interactive AI tutor.
/// The name "Les" comes from the Norwegian/Scandinavian word for "read."
#[derive(Parser, Debug)]
#[command(name = "les")]
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
    /// Initialize Les and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Generate a summary, quiz, and training scenarios from a PDF or video
    Study {
        /// Path to a PDF, MP4, or MKV file
        input: String,

        /// Write the study guide to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start an interactive tutor session over a PDF or video
    Tutor {
        /// Path to a PDF, MP4, or MKV file
        input: String,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

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
        /// Configuration key (e.g., "generation.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,
}
