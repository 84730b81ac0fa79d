use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Book not found: {book} in {source_name}")]
    BookNotFound { source_name: String, book: String },

    #[error("Chapter not found: {book} {chapter} in {source_name}")]
    ChapterNotFound { source_name: String, book: String, chapter: u32 },

    #[error("Malformed source {path}: {reason}")]
    MalformedSource { path: String, reason: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the "doesn't exist" kinds, as opposed to degraded I/O or bad data.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::SourceNotFound(_) | Error::BookNotFound { .. } | Error::ChapterNotFound { .. }
        )
    }

    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedSource { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
