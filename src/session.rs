//! Study session coordination.
//!
//! A `Session` runs the pipeline (ingest, extract, normalize) exactly once
//! and holds the normalized text for artifact generation and tutor
//! questions, so repeated questions never re-extract or re-translate.

use crate::assist::{Generator, OpenAiGenerator};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::extract::{self, Transcriber, WhisperTranscriber};
use crate::ingest::{self, IngestedFile, MaterialKind};
use crate::language::{self, DetectedLanguage, OpenAiTranslator, Translator};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Generated study artifacts, one result per panel.
///
/// Panels are independent: a failed panel carries its own error while the
/// others keep their content.
pub struct StudyGuide {
    pub summary: Result<String>,
    pub quiz: Result<String>,
    pub scenarios: Result<String>,
}

/// A study session over one piece of ingested material.
pub struct Session {
    file: IngestedFile,
    text: String,
    detected: Option<DetectedLanguage>,
    translated: bool,
    generator: Arc<dyn Generator>,
}

impl Session {
    /// Open a session from a file on disk, running the full pipeline.
    pub async fn open(input: impl AsRef<Path>, settings: &Settings) -> Result<Self> {
        let file = ingest::ingest_path(input.as_ref())?;
        Self::build(file, settings).await
    }

    /// Open a session from uploaded bytes, running the full pipeline.
    pub async fn from_bytes(name: &str, bytes: &[u8], settings: &Settings) -> Result<Self> {
        let file = ingest::ingest_bytes(name, bytes, &settings.temp_dir())?;
        Self::build(file, settings).await
    }

    async fn build(file: IngestedFile, settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let api_key = settings.openai.resolved_api_key();

        let transcriber = WhisperTranscriber::with_model(
            api_key.as_deref(),
            &settings.transcription.model,
        );
        let translator = OpenAiTranslator::new(api_key.as_deref(), &settings.language.model)
            .with_prompts(prompts.clone());
        let generator = Arc::new(
            OpenAiGenerator::new(api_key.as_deref(), settings.generation.clone())
                .with_prompts(prompts),
        );

        Self::with_components(
            file,
            settings.language.sample_chars,
            &transcriber,
            &translator,
            generator,
        )
        .await
    }

    /// Build a session with explicit pipeline components.
    #[instrument(skip_all, fields(kind = %file.kind()))]
    pub async fn with_components(
        file: IngestedFile,
        sample_chars: usize,
        transcriber: &dyn Transcriber,
        translator: &dyn Translator,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        info!("Extracting text from {} material", file.kind());
        let raw_text = extract::extract_text(&file, transcriber).await?;

        let normalized = language::normalize(raw_text, sample_chars, translator).await?;
        if normalized.translated {
            info!(
                "Translated from {}",
                normalized
                    .detected
                    .as_ref()
                    .map(|l| l.name.as_str())
                    .unwrap_or("unknown")
            );
        }

        Ok(Self {
            file,
            text: normalized.text,
            detected: normalized.detected,
            translated: normalized.translated,
            generator,
        })
    }

    /// The normalized (English) text of the material.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Kind of the ingested material.
    pub fn kind(&self) -> MaterialKind {
        self.file.kind()
    }

    /// Language detected from the leading sample, if any.
    pub fn detected_language(&self) -> Option<&DetectedLanguage> {
        self.detected.as_ref()
    }

    /// Whether the text was translated to English.
    pub fn translated(&self) -> bool {
        self.translated
    }

    /// Generate the three static panels.
    ///
    /// Each panel call stands alone; a failure is captured in that panel's
    /// result and the remaining panels still run.
    #[instrument(skip(self))]
    pub async fn generate_guide(&self) -> StudyGuide {
        StudyGuide {
            summary: self.generator.summary(&self.text).await,
            quiz: self.generator.quiz(&self.text).await,
            scenarios: self.generator.scenarios(&self.text).await,
        }
    }

    /// Answer a free-form question about the material.
    ///
    /// Each question is answered independently over the full text; there is
    /// no conversation memory.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<String> {
        self.generator.answer(&self.text, question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LesError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedTranscriber(String);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _media_path: &Path) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct NoopTranslator;

    #[async_trait]
    impl Translator for NoopTranslator {
        async fn translate(&self, text: &str, _source: &DetectedLanguage) -> Result<String> {
            Ok(text.to_string())
        }
    }

    /// Generator where individual panels can be made to fail.
    struct FlakyGenerator {
        fail_quiz: bool,
        questions: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Generator for FlakyGenerator {
        async fn summary(&self, content: &str) -> Result<String> {
            Ok(format!("summary of {} chars", content.chars().count()))
        }

        async fn quiz(&self, _content: &str) -> Result<String> {
            if self.fail_quiz {
                Err(LesError::Generation("model unavailable".to_string()))
            } else {
                Ok("quiz".to_string())
            }
        }

        async fn scenarios(&self, _content: &str) -> Result<String> {
            Ok("scenarios".to_string())
        }

        async fn answer(&self, _content: &str, question: &str) -> Result<String> {
            self.questions.lock().unwrap().push(question.to_string());
            Ok(format!("answer to: {}", question))
        }
    }

    async fn video_session(transcript: &str, fail_quiz: bool) -> Session {
        let dir = tempfile::tempdir().unwrap();
        let file = ingest::ingest_bytes("training.mp4", &[0u8; 8], dir.path()).unwrap();

        Session::with_components(
            file,
            500,
            &FixedTranscriber(transcript.to_string()),
            &NoopTranslator,
            Arc::new(FlakyGenerator {
                fail_quiz,
                questions: Mutex::new(Vec::new()),
            }),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_pipeline_runs_once_and_holds_text() {
        let session =
            video_session("Welcome to the safety training for all new staff members.", false)
                .await;

        assert_eq!(session.kind(), MaterialKind::Video);
        assert_eq!(
            session.text(),
            "Welcome to the safety training for all new staff members."
        );
        assert!(!session.translated());
    }

    #[tokio::test]
    async fn test_panel_failure_is_isolated() {
        let session =
            video_session("Welcome to the safety training for all new staff members.", true)
                .await;

        let guide = session.generate_guide().await;
        assert!(guide.summary.is_ok());
        assert!(guide.quiz.is_err());
        assert!(guide.scenarios.is_ok());
    }

    #[tokio::test]
    async fn test_ask_answers_each_question_independently() {
        let session =
            video_session("Welcome to the safety training for all new staff members.", false)
                .await;

        let first = session.ask("What is this about?").await.unwrap();
        let second = session.ask("Who is it for?").await.unwrap();

        assert_eq!(first, "answer to: What is this about?");
        assert_eq!(second, "answer to: Who is it for?");
    }
}
