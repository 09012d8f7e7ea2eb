//! Persists summaries, reflections and analyses, and clears processed notes.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::SummaryError;

const BATCH_STAMP: &str = "%Y-%m-%d_%H-%M-%S";
const RECORDING_STAMP: &str = "%Y%m%d_%H%M%S";

#[must_use]
pub fn summary_file_name(timestamp: &DateTime<Local>) -> String {
    format!("summary_{}.txt", timestamp.format(BATCH_STAMP))
}

#[must_use]
pub fn combined_analysis_file_name(timestamp: &DateTime<Local>) -> String {
    format!("combined_analysis_{}.txt", timestamp.format(BATCH_STAMP))
}

/// File-name stem for one recording: extension dropped, spaces replaced.
#[must_use]
pub fn recording_stem(recording_name: &str) -> String {
    let stem = Path::new(recording_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = if stem.is_empty() { "recording".to_string() } else { stem };
    stem.replace(' ', "_")
}

/// Reflection on one recording: `summary_<YYYYmmdd_HHMMSS>_<stem>.txt`.
#[must_use]
pub fn reflection_file_name(timestamp: &DateTime<Local>, stem: &str) -> String {
    format!("summary_{}_{stem}.txt", timestamp.format(RECORDING_STAMP))
}

/// Analysis of one recording: `analysis_<YYYYmmdd_HHMMSS>_<stem>.txt`.
#[must_use]
pub fn analysis_file_name(timestamp: &DateTime<Local>, stem: &str) -> String {
    format!("analysis_{}_{stem}.txt", timestamp.format(RECORDING_STAMP))
}

/// Write `text` to `folder/file_name`, creating the folder.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] when the folder or file cannot be written.
pub async fn write_text_file(
    folder: &Path,
    file_name: &str,
    text: &str,
) -> Result<PathBuf, SummaryError> {
    tokio::fs::create_dir_all(folder).await?;
    let path = folder.join(file_name);
    tokio::fs::write(&path, text).await?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Write `summary` to a timestamped file in `folder`, creating the folder.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] when the folder or file cannot be written.
pub async fn write_summary(folder: &Path, summary: &str) -> Result<PathBuf, SummaryError> {
    write_text_file(folder, &summary_file_name(&Local::now()), summary).await
}

/// Remove the regular files in `folder`, leaving subdirectories alone.
///
/// Returns the number of files removed.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] when the folder cannot be listed or a file
/// cannot be removed.
pub async fn cleanup_notes(folder: &Path) -> Result<usize, SummaryError> {
    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            tokio::fs::remove_file(entry.path()).await?;
            removed += 1;
        }
    }
    info!("Removed {} file(s) from {}", removed, folder.display());
    Ok(removed)
}

/// First `max_chars` characters of `text`, for console previews.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
