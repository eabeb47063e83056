//! Text extraction for Les.
//!
//! Produces plain text from ingested material: concatenated page text for
//! PDFs, a full transcript for videos.

pub mod media;
pub mod pdf;

pub use media::WhisperTranscriber;

use crate::error::Result;
use crate::ingest::{IngestedFile, MaterialKind};
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a media file's audio track and return the full transcript text.
    async fn transcribe(&self, media_path: &Path) -> Result<String>;
}

/// Extract plain text from an ingested file.
///
/// PDFs are read directly; videos go through audio extraction and the
/// given transcriber. Any failure here aborts the session.
pub async fn extract_text(file: &IngestedFile, transcriber: &dyn Transcriber) -> Result<String> {
    match file.kind() {
        MaterialKind::Pdf => pdf::extract_text(file.path()),
        MaterialKind::Video => transcriber.transcribe(file.path()).await,
    }
}
