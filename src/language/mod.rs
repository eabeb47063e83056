//! Language detection and normalization to English.
//!
//! The dominant language is detected from a leading sample of the extracted
//! text. Non-English material is translated in a single call over the full
//! text; English passes through untouched.

use crate::config::Prompts;
use crate::error::{LesError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use whatlang::Lang;

/// A language detected from the text's leading sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLanguage {
    /// ISO 639-3 code (e.g. "eng", "fra").
    pub code: String,
    /// Human-readable English name of the language.
    pub name: String,
}

/// Result of normalizing extracted text to English.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The final text, translated to English if needed.
    pub text: String,
    /// The detected language, if detection succeeded.
    pub detected: Option<DetectedLanguage>,
    /// Whether a translation call was made.
    pub translated: bool,
}

/// Trait for translation services.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate the full text from the given source language to English.
    async fn translate(&self, text: &str, source: &DetectedLanguage) -> Result<String>;
}

/// Detect the dominant language from the first `sample_chars` characters.
pub fn detect_language(text: &str, sample_chars: usize) -> Option<DetectedLanguage> {
    let sample: String = text.chars().take(sample_chars).collect();
    let info = whatlang::detect(&sample)?;

    Some(DetectedLanguage {
        code: info.lang().code().to_string(),
        name: info.lang().eng_name().to_string(),
    })
}

/// Normalize text to English.
///
/// Detection runs over the leading sample only; when it yields a non-English
/// language, the *entire* text is sent to the translator and replaced by the
/// translation. Undetectable text is assumed English and passed through.
/// Translation errors propagate and abort the session.
#[instrument(skip(text, translator), fields(chars = text.chars().count()))]
pub async fn normalize(
    text: String,
    sample_chars: usize,
    translator: &dyn Translator,
) -> Result<Normalized> {
    let detected = detect_language(&text, sample_chars);

    match &detected {
        Some(lang) if lang.code != Lang::Eng.code() => {
            info!("Detected {} ({}), translating to English", lang.name, lang.code);
            let translated = translator.translate(&text, lang).await?;
            Ok(Normalized {
                text: translated,
                detected,
                translated: true,
            })
        }
        Some(_) => {
            debug!("Text already in English, skipping translation");
            Ok(Normalized {
                text,
                detected,
                translated: false,
            })
        }
        None => {
            debug!("Language detection inconclusive, assuming English");
            Ok(Normalized {
                text,
                detected: None,
                translated: false,
            })
        }
    }
}

/// Chat-completion-backed translator.
pub struct OpenAiTranslator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl OpenAiTranslator {
    /// Create a new translator using the given model.
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self {
            client: create_client(api_key),
            model: model.to_string(),
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    #[instrument(skip(self, text), fields(source = %source.code))]
    async fn translate(&self, text: &str, source: &DetectedLanguage) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("source_language".to_string(), source.name.clone());
        vars.insert("content".to_string(), text.to_string());

        let system_prompt = self
            .prompts
            .render_with_custom(&self.prompts.translation.system, &vars);
        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.translation.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| LesError::Translation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| LesError::Translation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| LesError::Translation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LesError::OpenAI(format!("Translation request failed: {}", e)))?;

        let translated = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| LesError::Translation("Empty response from translator".to_string()))?
            .clone();

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fake translator that records what it was asked to translate.
    struct RecordingTranslator {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingTranslator {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(&self, text: &str, _source: &DetectedLanguage) -> Result<String> {
            self.calls.lock().unwrap().push(text.to_string());
            Ok(format!("[en] {}", text))
        }
    }

    const ENGLISH: &str = "The quick brown fox jumps over the lazy dog. \
        This handbook describes the onboarding process for new employees, \
        including safety training and equipment handling procedures.";

    const FRENCH: &str = "Le renard brun rapide saute par-dessus le chien paresseux. \
        Ce manuel décrit le processus d'intégration des nouveaux employés, \
        y compris la formation à la sécurité et les procédures de manipulation.";

    #[test]
    fn test_detect_english() {
        let detected = detect_language(ENGLISH, 500).unwrap();
        assert_eq!(detected.code, "eng");
    }

    #[test]
    fn test_detect_french() {
        let detected = detect_language(FRENCH, 500).unwrap();
        assert_eq!(detected.code, "fra");
    }

    #[test]
    fn test_detect_uses_leading_sample_only() {
        // French lead followed by a long English tail; with a 500-char
        // sample the lead dominates.
        let mixed = format!("{} {}", FRENCH, ENGLISH.repeat(10));
        let detected = detect_language(&mixed, FRENCH.chars().count()).unwrap();
        assert_eq!(detected.code, "fra");
    }

    #[tokio::test]
    async fn test_english_text_passes_through_unchanged() {
        let translator = RecordingTranslator::new();
        let result = normalize(ENGLISH.to_string(), 500, &translator).await.unwrap();

        assert_eq!(result.text, ENGLISH);
        assert!(!result.translated);
        assert!(translator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_english_translates_full_text() {
        // The detection sample is 500 chars but translation must cover the
        // whole document.
        let long_french = FRENCH.repeat(20);
        let translator = RecordingTranslator::new();
        let result = normalize(long_french.clone(), 500, &translator).await.unwrap();

        assert!(result.translated);
        assert_eq!(result.detected.as_ref().unwrap().code, "fra");

        let calls = translator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], long_french);
        assert_eq!(result.text, format!("[en] {}", long_french));
    }

    #[tokio::test]
    async fn test_undetectable_text_assumed_english() {
        let translator = RecordingTranslator::new();
        let result = normalize("12345 67890".to_string(), 500, &translator)
            .await
            .unwrap();

        assert!(!result.translated);
        assert!(translator.calls.lock().unwrap().is_empty());
    }
}
