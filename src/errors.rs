use thiserror::Error;

/// Failure of a single generation request. Recovered locally by retrying.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to access generation API (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Failed to generate text after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last_error: GenerationError,
    },

    #[error("Nothing to summarize: the document is empty")]
    EmptyDocument,

    #[error("Failed to access the filesystem: {0}")]
    Io(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to transcribe audio: {0}")]
    Transcription(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        GenerationError::Http(error.to_string())
    }
}

impl From<std::io::Error> for SummaryError {
    fn from(error: std::io::Error) -> Self {
        SummaryError::Io(error.to_string())
    }
}
