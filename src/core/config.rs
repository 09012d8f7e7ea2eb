use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::SummaryError;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_NOTES_FOLDER: &str = "notes_data";
pub const DEFAULT_SUMMARY_FOLDER: &str = "summary_data";
pub const DEFAULT_CHUNK_CHARS: usize = 15_000;
pub const DEFAULT_CHUNK_MAX_TOKENS: u32 = 800;
pub const DEFAULT_FINAL_MAX_TOKENS: u32 = 900;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub groq_api_key: String,
    pub groq_api_base: String,
    pub model: String,
    pub fallback_model: Option<String>,
    pub notes_folder: PathBuf,
    pub summary_folder: PathBuf,
    pub chunk_chars: usize,
    pub chunk_max_tokens: u32,
    pub final_max_tokens: u32,
    pub cleanup_notes: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SummaryError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummaryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            groq_api_key: var("GROQ_API_KEY")
                .ok_or_else(|| {
                    SummaryError::Config("GROQ_API_KEY: environment variable not found".to_string())
                })?,
            groq_api_base: var("GROQ_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            fallback_model: var("GROQ_FALLBACK_MODEL"),
            notes_folder: var("NOTES_FOLDER")
                .unwrap_or_else(|| DEFAULT_NOTES_FOLDER.to_string())
                .into(),
            summary_folder: var("SUMMARY_FOLDER")
                .unwrap_or_else(|| DEFAULT_SUMMARY_FOLDER.to_string())
                .into(),
            chunk_chars: parse_var("CHUNK_CHARS", var("CHUNK_CHARS"), DEFAULT_CHUNK_CHARS)?,
            chunk_max_tokens: parse_var(
                "CHUNK_MAX_TOKENS",
                var("CHUNK_MAX_TOKENS"),
                DEFAULT_CHUNK_MAX_TOKENS,
            )?,
            final_max_tokens: parse_var(
                "FINAL_MAX_TOKENS",
                var("FINAL_MAX_TOKENS"),
                DEFAULT_FINAL_MAX_TOKENS,
            )?,
            cleanup_notes: var("CLEANUP_NOTES").is_some_and(|v| {
                matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
            }),
        })
    }
}

fn parse_var<T>(name: &str, raw: Option<String>, default: T) -> Result<T, SummaryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| SummaryError::Config(format!("{name}: invalid value {value:?}: {e}"))),
        None => Ok(default),
    }
}
