/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, NotesError>;

/// Error types for the notes pipeline
#[derive(thiserror::Error, Debug)]
pub enum NotesError {
    #[error("no transcript found for video '{0}' in any preferred language")]
    TranscriptUnavailable(String),

    #[error("transcripts are disabled for video '{0}'")]
    TranscriptsDisabled(String),

    #[error("translation failed: {0}")]
    TranslationFailed(String),

    #[error("summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
