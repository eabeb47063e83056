//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Les Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    // External tools (only video transcription needs ffmpeg)
    println!("{}", style("External Tools").bold());
    let ffmpeg_check = check_tool(
        "ffmpeg",
        "Install: https://ffmpeg.org/download.html (or 'brew install ffmpeg' / 'apt install ffmpeg')",
    );
    ffmpeg_check.print();
    checks.push(ffmpeg_check);

    println!();

    // API configuration
    println!("{}", style("API Configuration").bold());
    let api_check = check_api_key(settings);
    api_check.print();
    checks.push(api_check);

    println!();

    // Directories
    println!("{}", style("Directories").bold());
    let dir_check = check_directory("data directory", &settings.data_dir());
    dir_check.print();
    checks.push(dir_check);
    let temp_check = check_directory("temp directory", &settings.temp_dir());
    temp_check.print();
    checks.push(temp_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors == 0 && warnings == 0 {
        Output::success("All checks passed. Les is ready to use!");
    } else if errors == 0 {
        Output::warning(&format!("{} warning(s). Some features may not work.", warnings));
    } else {
        Output::error(&format!(
            "{} error(s), {} warning(s). Fix the issues above before using Les.",
            errors, warnings
        ));
    }
    println!();

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str, hint: &str) -> CheckResult {
    match Command::new(name).arg("-version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .to_string();
            CheckResult::ok(name, &version)
        }
        Ok(_) => CheckResult::warning(name, "installed but not working correctly", hint),
        Err(_) => CheckResult::warning(name, "not found (video transcription disabled)", hint),
    }
}

/// Check if an OpenAI API key is configured.
fn check_api_key(settings: &Settings) -> CheckResult {
    match settings.openai.resolved_api_key() {
        Some(key) => CheckResult::ok("OpenAI API key", &mask_key(&key)),
        None => CheckResult::error(
            "OpenAI API key",
            "not configured",
            "Set it with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Mask an API key for display, keeping a short prefix and suffix.
/// Counts characters, not bytes, so multi-byte keys never split mid-codepoint.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let prefix: String = chars[..5].iter().collect();
        let suffix: String = chars[chars.len() - 3..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "configured".to_string()
    }
}

/// Check that a directory exists or can be created.
fn check_directory(name: &str, path: &std::path::Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok(name, &path.display().to_string())
    } else {
        CheckResult::warning(
            name,
            &format!("{} (will be created on first use)", path.display()),
            "Run 'les init' to create it now",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key_ascii() {
        assert_eq!(mask_key("sk-proj-abcdef123"), "sk-pr...123");
    }

    #[test]
    fn test_mask_key_short_key_fully_hidden() {
        assert_eq!(mask_key("sk-abc"), "configured");
    }

    #[test]
    fn test_mask_key_multibyte_does_not_panic() {
        // Keys with multi-byte characters must be masked per character,
        // never byte-sliced.
        assert_eq!(mask_key("ské-proj-abcdefé"), "ské-p...efé");
    }
}
