//! Study command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::ingest::MaterialKind;
use crate::session::Session;
use anyhow::Result;
use std::path::Path;

/// Run the study command: full pipeline, then render the three panels.
pub async fn run_study(input: &str, output: Option<String>, settings: Settings) -> Result<()> {
    let kind = MaterialKind::from_name(input)?;

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::for_kind(kind), &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'les doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let spinner = Output::spinner(match kind {
        MaterialKind::Pdf => "Extracting text from PDF...",
        MaterialKind::Video => "Transcribing video...",
    });
    let session = Session::open(Path::new(input), &settings).await?;
    spinner.finish_and_clear();

    if session.translated() {
        let lang = session
            .detected_language()
            .map(|l| l.name.clone())
            .unwrap_or_else(|| "unknown".to_string());
        Output::info(&format!("Translated from {} to English.", lang));
    }
    Output::success("Content processed successfully!");

    let spinner = Output::spinner("Generating study guide...");
    let guide = session.generate_guide().await;
    spinner.finish_and_clear();

    match output {
        Some(path) => {
            let mut out = String::new();
            for (title, result) in [
                ("Summary", &guide.summary),
                ("Quiz", &guide.quiz),
                ("Scenarios", &guide.scenarios),
            ] {
                out.push_str(&format!("## {}\n\n", title));
                match result {
                    Ok(content) => out.push_str(&format!("{}\n\n", content)),
                    Err(e) => out.push_str(&format!("_Generation failed: {}_\n\n", e)),
                }
            }
            std::fs::write(&path, out)?;
            Output::success(&format!("Study guide written to {}", path));
        }
        None => {
            Output::panel("Summary", &guide.summary);
            Output::panel("Quiz", &guide.quiz);
            Output::panel("Scenarios", &guide.scenarios);
        }
    }

    Ok(())
}
