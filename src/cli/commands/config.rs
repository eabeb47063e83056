//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, mut settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            set_value(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment to the settings.
fn set_value(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "general.data_dir" => settings.general.data_dir = value.to_string(),
        "general.temp_dir" => settings.general.temp_dir = value.to_string(),
        "general.log_level" => settings.general.log_level = value.to_string(),
        "openai.api_key" => settings.openai.api_key = Some(value.to_string()),
        "openai.timeout_seconds" => settings.openai.timeout_seconds = value.parse()?,
        "transcription.model" => settings.transcription.model = value.to_string(),
        "language.model" => settings.language.model = value.to_string(),
        "language.sample_chars" => settings.language.sample_chars = value.parse()?,
        "generation.model" => settings.generation.model = value.to_string(),
        "generation.summary_chars" => settings.generation.summary_chars = value.parse()?,
        "generation.quiz_chars" => settings.generation.quiz_chars = value.parse()?,
        "generation.temperature" => settings.generation.temperature = value.parse()?,
        _ => anyhow::bail!("Unknown configuration key: {}", key),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut settings = Settings::default();
        set_value(&mut settings, "generation.model", "gpt-4.1").unwrap();
        assert_eq!(settings.generation.model, "gpt-4.1");

        set_value(&mut settings, "language.sample_chars", "800").unwrap();
        assert_eq!(settings.language.sample_chars, 800);
    }

    #[test]
    fn test_set_unknown_key_fails() {
        let mut settings = Settings::default();
        assert!(set_value(&mut settings, "nope.nothing", "x").is_err());
    }
}
