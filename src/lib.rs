//! Les - Study Assistant for PDFs and Videos
//!
//! A CLI tool that turns training material into summaries, quizzes,
//! scenarios, and an interactive AI tutor.
//!
//! The name "Les" comes from the Norwegian/Scandinavian word for "read."
//!
//! # Overview
//!
//! Les allows you to:
//! - Ingest a PDF or video file and extract its text (or transcript)
//! - Translate non-English material to English automatically
//! - Generate a summary, a multiple-choice quiz, and training scenarios
//! - Ask free-form questions about the material via an AI tutor
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `ingest` - File ingestion and material classification
//! - `extract` - Text extraction (PDF text, video transcription)
//! - `language` - Language detection and translation to English
//! - `assist` - Study artifact generation (summary, quiz, scenarios, tutor)
//! - `session` - Pipeline coordination and per-material state
//!
//! # Example
//!
//! ```rust,no_run
//! use les::config::Settings;
//! use les::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let session = Session::open("handbook.pdf", &settings).await?;
//!
//!     let guide = session.generate_guide().await;
//!     if let Ok(summary) = &guide.summary {
//!         println!("{}", summary);
//!     }
//!
//!     let answer = session.ask("What is the refund policy?").await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod assist;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod language;
pub mod openai;
pub mod session;

pub use error::{LesError, Result};
