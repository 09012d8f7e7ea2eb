//! Assembles the document to summarize from a folder of notes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::SummaryError;

/// File extensions handed to the [`Transcriber`].
pub const AUDIO_EXTENSIONS: &[&str] = &["m4a", "wav", "mp3", "ogg"];

/// Speech-to-text engine: audio file in, transcript text out.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, SummaryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Text,
    Audio,
}

impl NoteKind {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "txt" {
            Some(NoteKind::Text)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(NoteKind::Audio)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            NoteKind::Text => "txt",
            NoteKind::Audio => "audio",
        }
    }
}

/// Source-delimiting block for one note inside the combined document.
#[must_use]
pub fn format_note(file_name: &str, kind: NoteKind, text: &str) -> String {
    format!("\n---\n{file_name} ({}):\n{text}\n", kind.label())
}

/// Read every note in `folder`, in file-name order, into one document.
///
/// Text notes are trimmed and skipped when empty. Audio notes are transcribed
/// when a transcriber is available; failures are logged and the note skipped.
/// A missing folder yields an empty document.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] when the folder or a text note cannot be read.
pub async fn read_all_notes(
    folder: &Path,
    transcriber: Option<&dyn Transcriber>,
) -> Result<String, SummaryError> {
    if !tokio::fs::try_exists(folder).await? {
        info!("Notes folder {} does not exist", folder.display());
        return Ok(String::new());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    let mut entries = tokio::fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut document = String::new();
    for path in paths {
        let Some(kind) = NoteKind::from_path(&path) else {
            continue;
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match kind {
            NoteKind::Text => {
                let text = tokio::fs::read_to_string(&path).await?;
                let text = text.trim();
                if !text.is_empty() {
                    document.push_str(&format_note(&file_name, kind, text));
                }
            }
            NoteKind::Audio => {
                let Some(transcriber) = transcriber else {
                    warn!("Skipping audio note {} (no transcriber configured)", file_name);
                    continue;
                };
                match transcriber.transcribe(&path).await {
                    Ok(text) => document.push_str(&format_note(&file_name, kind, text.trim())),
                    Err(e) => warn!("Failed to process {}: {}", file_name, e),
                }
            }
        }
    }

    info!("Collected {} characters of notes", document.chars().count());
    Ok(document)
}
