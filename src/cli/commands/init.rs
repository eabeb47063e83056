//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Les Setup");
    println!();
    println!("Welcome to Les! Let's make sure everything is configured correctly.\n");

    // Step 1: Check prerequisites
    println!("{}", style("Step 1: Checking prerequisites").bold().cyan());
    println!();

    if check_ffmpeg() {
        Output::success("ffmpeg is installed (required for video material).");
    } else {
        Output::warning("ffmpeg not found. Video transcription will not work.");
        println!(
            "    {} {}",
            style("→").dim(),
            style("Install: https://ffmpeg.org/download.html (or 'brew install ffmpeg' / 'apt install ffmpeg')").dim()
        );
        println!();

        if !prompt_continue("Continue anyway?")? {
            println!();
            Output::info("Setup cancelled. Install ffmpeg and run 'les init' again.");
            return Ok(());
        }
    }

    println!();

    // Step 2: Check API key
    println!("{}", style("Step 2: Checking API configuration").bold().cyan());
    println!();

    if settings.openai.resolved_api_key().is_none() {
        Output::warning("No OpenAI API key is configured.");
        println!();
        println!("  Les requires an OpenAI API key for transcription, translation, and generation.");
        println!(
            "  Get your API key from: {}",
            style("https://platform.openai.com/api-keys").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'les init' again.");
            return Ok(());
        }
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 3: Create directories and default config
    println!("{}", style("Step 3: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    let temp_dir = settings.temp_dir();

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::success(&format!("Data directory exists: {}", data_dir.display()));
    }

    if !temp_dir.exists() {
        std::fs::create_dir_all(&temp_dir)?;
        Output::success(&format!("Created temp directory: {}", temp_dir.display()));
    } else {
        Output::success(&format!("Temp directory exists: {}", temp_dir.display()));
    }

    let config_path = Settings::default_config_path();
    if !config_path.exists() {
        settings.save()?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    } else {
        Output::success(&format!("Config file exists: {}", config_path.display()));
    }

    println!();
    Output::header("You're all set!");
    println!();
    println!("Try it out:");
    println!("  {}", style("les study handbook.pdf").green());
    println!("  {}", style("les tutor training.mp4").green());
    println!();

    Ok(())
}

/// Check if ffmpeg is available.
fn check_ffmpeg() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Prompt the user to continue (y/N).
fn prompt_continue(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
