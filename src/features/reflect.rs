//! Reflection and analysis of individual recordings.

use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::ai::client::TextGenerator;
use crate::errors::SummaryError;
use crate::features::deliver::{
    analysis_file_name, combined_analysis_file_name, recording_stem, reflection_file_name,
    write_text_file,
};
use crate::features::summarize::Summarizer;

/// Files written for one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingReport {
    pub reflection: String,
    pub reflection_path: PathBuf,
    pub analysis: String,
    pub analysis_path: PathBuf,
}

/// Reflect on one transcript, save it, then analyze the reflection and save
/// that too. Both files share one timestamp.
///
/// The reflection file is written before the analysis call, so it survives
/// a failed analysis.
///
/// # Errors
///
/// Returns [`SummaryError::ExhaustedRetries`] from either model call, or
/// [`SummaryError::Io`] when a file cannot be written.
pub async fn process_transcript<G: TextGenerator>(
    summarizer: &Summarizer<G>,
    transcript: &str,
    recording_name: &str,
    output_folder: &Path,
) -> Result<RecordingReport, SummaryError> {
    let timestamp = Local::now();
    let stem = recording_stem(recording_name);

    info!("Reflecting on recording {}", recording_name);
    let reflection = summarizer.reflect(transcript).await?;
    let reflection_path = write_text_file(
        output_folder,
        &reflection_file_name(&timestamp, &stem),
        &reflection,
    )
    .await?;

    info!("Analyzing reflection for {}", recording_name);
    let analysis = summarizer.analyze(&reflection).await?;
    let analysis_path = write_text_file(
        output_folder,
        &analysis_file_name(&timestamp, &stem),
        &analysis,
    )
    .await?;

    Ok(RecordingReport {
        reflection,
        reflection_path,
        analysis,
        analysis_path,
    })
}

/// Analyze every `.txt` file in `notes_folder`, in file-name order, and write
/// the results into one `combined_analysis_<timestamp>.txt` in `output_folder`.
///
/// Files whose analysis fails are logged and left out. Returns `None` when
/// there is nothing to analyze.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] when the folders cannot be read or written.
pub async fn analyze_all_notes<G: TextGenerator>(
    summarizer: &Summarizer<G>,
    notes_folder: &Path,
    output_folder: &Path,
) -> Result<Option<PathBuf>, SummaryError> {
    let mut names: Vec<String> = Vec::new();
    let mut entries = tokio::fs::read_dir(notes_folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_file() && name.ends_with(".txt") {
            names.push(name);
        }
    }
    names.sort();

    if names.is_empty() {
        info!("No notes to analyze in {}", notes_folder.display());
        return Ok(None);
    }

    let mut sections = Vec::with_capacity(names.len());
    for name in &names {
        info!("Analyzing {}", name);
        let text = tokio::fs::read_to_string(notes_folder.join(name)).await?;
        match summarizer.analyze(&text).await {
            Ok(analysis) => sections.push(format!("--- {name} ---\n{analysis}\n")),
            Err(e) => warn!("Failed to analyze {}: {}", name, e),
        }
    }

    let path = write_text_file(
        output_folder,
        &combined_analysis_file_name(&Local::now()),
        &sections.join("\n\n"),
    )
    .await?;
    Ok(Some(path))
}
