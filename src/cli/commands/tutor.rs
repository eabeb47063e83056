//! Interactive tutor command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::ingest::MaterialKind;
use crate::session::Session;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive tutor command.
///
/// The pipeline runs once up front; each question is answered independently
/// over the stored text with no conversation memory.
pub async fn run_tutor(input: &str, settings: Settings) -> Result<()> {
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
    let session = Session::open(input, &settings).await?;
    spinner.finish_and_clear();

    Output::success("Content processed successfully!");

    println!("\n{}", style("Les Tutor").bold().cyan());
    println!(
        "{}\n",
        style("Ask anything about your material, or 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }

        let question = question.trim();

        if question.is_empty() {
            continue;
        }

        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Thinking...");
        match session.ask(question).await {
            Ok(answer) => {
                spinner.finish_and_clear();
                println!("\n{} {}\n", style("Tutor:").cyan().bold(), answer);
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::error("Failed to answer the question.");
                eprintln!("   {}", style(e.to_string()).dim());
            }
        }
    }

    Ok(())
}
