//! NotePsyche command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notepsyche::ai::LlmClient;
use notepsyche::core::config::AppConfig;
use notepsyche::features::collect::read_all_notes;
use notepsyche::features::deliver::{cleanup_notes, preview, write_summary};
use notepsyche::features::reflect::{analyze_all_notes, process_transcript};
use notepsyche::features::summarize::Summarizer;
use std::path::PathBuf;
use tracing::{error, info};

const PREVIEW_CHARS: usize = 2000;

/// NotePsyche - summaries and reflections for a personal audio journal
#[derive(Parser, Debug)]
#[command(name = "notepsyche")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize every note in the notes folder into one summary file
    Summarize,
    /// Reflect on transcripts and analyze each reflection
    Reflect {
        /// Transcript text files, one per recording
        #[arg(required = true)]
        transcripts: Vec<PathBuf>,
    },
    /// Analyze every text note and write one combined analysis file
    AnalyzeNotes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    notepsyche::setup_logging();

    let config = AppConfig::from_env().inspect_err(|e| error!("Config error: {}", e))?;
    let summarizer = Summarizer::new(LlmClient::from_config(&config), config.model.clone())
        .with_fallback_model(config.fallback_model.clone());

    match cli.command {
        Commands::Summarize => summarize(&config, &summarizer).await,
        Commands::Reflect { transcripts } => {
            for path in transcripts {
                let transcript = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading transcript {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                let report = process_transcript(
                    &summarizer,
                    &transcript,
                    &name,
                    &config.summary_folder,
                )
                .await
                .inspect_err(|e| error!("Failed to process {}: {}", name, e))?;

                println!("Reflection saved to {}", report.reflection_path.display());
                println!("Analysis saved to {}", report.analysis_path.display());
            }
            Ok(())
        }
        Commands::AnalyzeNotes => {
            match analyze_all_notes(&summarizer, &config.notes_folder, &config.summary_folder)
                .await?
            {
                Some(path) => println!("Combined analysis saved to {}", path.display()),
                None => println!("No notes to analyze in {}", config.notes_folder.display()),
            }
            Ok(())
        }
    }
}

async fn summarize(config: &AppConfig, summarizer: &Summarizer<LlmClient>) -> Result<()> {
    let notes = read_all_notes(&config.notes_folder, None)
        .await
        .with_context(|| format!("reading notes from {}", config.notes_folder.display()))?;
    if notes.trim().is_empty() {
        info!("No notes to process");
        return Ok(());
    }

    info!("Sending notes to model {}", config.model);
    let summary = summarizer
        .summarize_hierarchical(
            &notes,
            config.chunk_chars,
            config.chunk_max_tokens,
            config.final_max_tokens,
        )
        .await
        .inspect_err(|e| error!("Failed to generate summary: {}", e))?;

    let path = write_summary(&config.summary_folder, &summary).await?;
    println!("Summary saved to {}\n", path.display());
    println!("=== SUMMARY (preview) ===\n");
    println!("{}", preview(&summary, PREVIEW_CHARS));

    if config.cleanup_notes {
        cleanup_notes(&config.notes_folder).await?;
    }

    Ok(())
}
