//! Study artifact generation.
//!
//! Four independent single-turn chat-completion calls over the normalized
//! text: summary, quiz, scenarios, and per-question tutor answers. Each
//! call is independently fallible so one panel's failure never takes down
//! the others.

use crate::config::{GenerationSettings, Prompts};
use crate::error::{LesError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// The study panels that can be generated from normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Summary,
    Quiz,
    Scenarios,
    Tutor,
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Panel::Summary => write!(f, "summary"),
            Panel::Quiz => write!(f, "quiz"),
            Panel::Scenarios => write!(f, "scenarios"),
            Panel::Tutor => write!(f, "tutor"),
        }
    }
}

/// Trait for study artifact generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Condense the content into a summary.
    async fn summary(&self, content: &str) -> Result<String>;

    /// Produce 5 multiple-choice questions with the correct answers marked.
    async fn quiz(&self, content: &str) -> Result<String>;

    /// Produce 3 open-ended situational training scenarios.
    async fn scenarios(&self, content: &str) -> Result<String>;

    /// Answer a free-form user question about the content.
    async fn answer(&self, content: &str, question: &str) -> Result<String>;
}

/// Truncate a string to at most `max_chars` characters, respecting UTF-8
/// boundaries. Returns a borrowed slice when no truncation is needed.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Chat-completion-backed generator.
pub struct OpenAiGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    settings: GenerationSettings,
    prompts: Prompts,
}

impl OpenAiGenerator {
    /// Create a new generator.
    pub fn new(api_key: Option<&str>, settings: GenerationSettings) -> Self {
        Self {
            client: create_client(api_key),
            settings,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Issue a single-turn chat completion with the rendered prompt.
    #[instrument(skip(self, template, vars), fields(panel = %panel))]
    async fn complete(
        &self,
        panel: Panel,
        template: &str,
        vars: &HashMap<String, String>,
    ) -> Result<String> {
        let prompt = self.prompts.render_with_custom(template, vars);
        debug!("Prompt length: {} chars", prompt.chars().count());

        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| LesError::Generation(e.to_string()))?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(messages)
            .temperature(self.settings.temperature)
            .build()
            .map_err(|e| LesError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LesError::OpenAI(format!("{} request failed: {}", panel, e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .cloned()
            .ok_or_else(|| LesError::Generation(format!("Empty {} response from model", panel)))
    }

    fn content_vars(content: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("content".to_string(), content.to_string());
        vars
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn summary(&self, content: &str) -> Result<String> {
        let short = truncate_chars(content, self.settings.summary_chars);
        let template = self.prompts.generation.summary.clone();
        self.complete(Panel::Summary, &template, &Self::content_vars(short))
            .await
    }

    async fn quiz(&self, content: &str) -> Result<String> {
        let short = truncate_chars(content, self.settings.quiz_chars);
        let template = self.prompts.generation.quiz.clone();
        self.complete(Panel::Quiz, &template, &Self::content_vars(short))
            .await
    }

    async fn scenarios(&self, content: &str) -> Result<String> {
        // Intentionally untruncated: the scenarios prompt carries the full
        // text, matching the summary/quiz asymmetry of the original tool.
        let template = self.prompts.generation.scenarios.clone();
        self.complete(Panel::Scenarios, &template, &Self::content_vars(content))
            .await
    }

    async fn answer(&self, content: &str, question: &str) -> Result<String> {
        let mut vars = Self::content_vars(content);
        vars.insert("question".to_string(), question.to_string());
        let template = self.prompts.generation.tutor.clone();
        self.complete(Panel::Tutor, &template, &vars).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;

    #[test]
    fn test_truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("hello", 3000), "hello");
    }

    #[test]
    fn test_truncate_chars_caps_length() {
        let long = "a".repeat(5000);
        assert_eq!(truncate_chars(&long, 3000).chars().count(), 3000);
    }

    #[test]
    fn test_truncate_chars_utf8_safe() {
        // Multi-byte characters must not be split mid-codepoint.
        let text = "héllo wörld æøå".repeat(300);
        let truncated = truncate_chars(&text, 3000);
        assert_eq!(truncated.chars().count(), 3000);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_summary_prompt_respects_budget() {
        let long = "x".repeat(10_000);
        let short = truncate_chars(&long, 3000);

        let prompts = Prompts::default();
        let mut vars = std::collections::HashMap::new();
        vars.insert("content".to_string(), short.to_string());
        let rendered = Prompts::render(&prompts.generation.summary, &vars);

        // The rendered prompt embeds at most the first 3000 chars of content.
        let template_overhead = prompts.generation.summary.len() - "{{content}}".len();
        assert!(rendered.len() <= 3000 + template_overhead);
        assert!(!rendered.contains(&"x".repeat(3001)));
    }
}
