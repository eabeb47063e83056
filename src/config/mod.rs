//! Configuration module for Les.

mod prompts;
mod settings;

pub use prompts::{GenerationPrompts, Prompts, TranslationPrompts};
pub use settings::{
    GeneralSettings, GenerationSettings, LanguageSettings, OpenAiSettings, Settings,
    TranscriptionSettings,
};
