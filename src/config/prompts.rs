//! Prompt templates for Les.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub generation: GenerationPrompts,
    pub translation: TranslationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for the four study panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPrompts {
    pub summary: String,
    pub quiz: String,
    pub scenarios: String,
    pub tutor: String,
}

impl Default for GenerationPrompts {
    fn default() -> Self {
        Self {
            summary: "Summarize the following text:\n\n{{content}}".to_string(),

            quiz: "Create 5 multiple-choice questions with 4 options each based on \
                   this content. Mark the correct answer with (*) symbol:\n{{content}}"
                .to_string(),

            scenarios: "Generate 3 real-world training scenarios from this content. \
                        Ask the user how they would respond.\n\n{{content}}"
                .to_string(),

            tutor: "This is the content: {{content}}\nNow answer the user's question: {{question}}"
                .to_string(),
        }
    }
}

/// Prompts for translating extracted text to English.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationPrompts {
    pub system: String,
    pub user: String,
}

impl Default for TranslationPrompts {
    fn default() -> Self {
        Self {
            system: "You are a professional translator. Translate the user's text from \
                     {{source_language}} to English. Preserve the meaning, tone, and \
                     formatting. Output only the translated text with no commentary."
                .to_string(),

            user: "{{content}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let generation_path = custom_path.join("generation.toml");
            if generation_path.exists() {
                let content = std::fs::read_to_string(&generation_path)?;
                prompts.generation = toml::from_str(&content)?;
            }

            let translation_path = custom_path.join("translation.toml");
            if translation_path.exists() {
                let content = std::fs::read_to_string(&translation_path)?;
                prompts.translation = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.generation.summary.contains("{{content}}"));
        assert!(prompts.generation.tutor.contains("{{question}}"));
        assert!(!prompts.translation.system.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Summarize: {{content}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("content".to_string(), "Hello world.".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Summarize: Hello world.");
    }

    #[test]
    fn test_custom_variables_overridden_by_provided() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("content".to_string(), "from config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("content".to_string(), "from call".to_string());

        let result = prompts.render_with_custom("{{content}}", &vars);
        assert_eq!(result, "from call");
    }
}
