//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{LesError, Result};
use crate::ingest::MaterialKind;
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Studying a PDF requires an API key only.
    StudyPdf,
    /// Studying a video additionally requires ffmpeg.
    StudyVideo,
    /// Serving requires an API key up front; ffmpeg is only needed once a
    /// video upload arrives, so its absence degrades rather than blocks.
    Serve,
}

impl Operation {
    /// Pick the operation matching a material kind.
    pub fn for_kind(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Pdf => Operation::StudyPdf,
            MaterialKind::Video => Operation::StudyVideo,
        }
    }
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::StudyPdf | Operation::Serve => {
            check_api_key(settings)?;
        }
        Operation::StudyVideo => {
            check_api_key(settings)?;
            check_tool("ffmpeg")?;
        }
    }
    Ok(())
}

/// Check if an OpenAI API key is configured (config file or environment).
fn check_api_key(settings: &Settings) -> Result<()> {
    match settings.openai.resolved_api_key() {
        Some(_) => Ok(()),
        None => Err(LesError::Config(
            "No OpenAI API key configured. Set it with: export OPENAI_API_KEY='sk-...' \
             or 'les config set openai.api_key sk-...'"
                .to_string(),
        )),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash)
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(LesError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LesError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(LesError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_check_passes_with_config_key() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-test".to_string());
        assert!(check(Operation::StudyPdf, &settings).is_ok());
    }

    #[test]
    fn test_serve_check_requires_api_key_only() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-test".to_string());
        // No tool requirements at startup; a key alone is sufficient.
        assert!(check(Operation::Serve, &settings).is_ok());
    }

    #[test]
    fn test_operation_for_kind() {
        assert!(matches!(
            Operation::for_kind(MaterialKind::Pdf),
            Operation::StudyPdf
        ));
        assert!(matches!(
            Operation::for_kind(MaterialKind::Video),
            Operation::StudyVideo
        ));
    }
}
