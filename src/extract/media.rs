//! Video transcription via OpenAI Whisper.
//!
//! The audio track is pulled out of the video container with ffmpeg, then
//! transcribed in a single API call. No chunking, no timestamps.

use super::Transcriber;
use crate::error::{LesError, Result};
use crate::openai::create_client;
use async_openai::types::CreateTranscriptionRequestArgs;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// OpenAI Whisper-based transcriber for video files.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with the default model.
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_model(api_key, "whisper-1")
    }

    /// Create a new Whisper transcriber with a specific model.
    pub fn with_model(api_key: Option<&str>, model: &str) -> Self {
        Self {
            client: create_client(api_key),
            model: model.to_string(),
        }
    }

    /// Transcribe a single audio file in one call.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_audio(&self, audio_path: &Path) -> Result<String> {
        debug!("Transcribing audio with {}", self.model);

        let file_bytes = tokio::fs::read(audio_path).await?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.mp3")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .build()
            .map_err(|e| LesError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| LesError::OpenAI(format!("Whisper API error: {}", e)))?;

        Ok(response.text.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, media_path: &Path) -> Result<String> {
        let temp_dir = tempfile::tempdir()?;
        let audio_path = temp_dir.path().join("audio.mp3");

        extract_audio(media_path, &audio_path).await?;
        let text = self.transcribe_audio(&audio_path).await?;

        drop(temp_dir);
        Ok(text)
    }
}

/// Extract the audio track of a video file to MP3 using ffmpeg.
async fn extract_audio(source: &Path, dest: &Path) -> Result<()> {
    debug!("Extracting audio from {:?}", source);

    let result = Command::new("ffmpeg")
        .arg("-i").arg(source)
        .arg("-vn")
        .arg("-codec:a").arg("libmp3lame")
        .arg("-qscale:a").arg("2")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(LesError::ToolFailed(format!(
                "ffmpeg audio extraction failed: {err}"
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LesError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(LesError::ToolFailed(format!("ffmpeg error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extract_audio_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.mp3");
        let result = extract_audio(Path::new("/nonexistent/clip.mp4"), &dest).await;
        assert!(result.is_err());
    }
}
