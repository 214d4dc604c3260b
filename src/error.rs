use thiserror::Error;

pub type Result<T> = std::result::Result<T, RagError>;

/// Failures surfaced by the indexing and question-answering pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    Validation(String),

    /// A required credential or setting is absent.
    #[error("{0}")]
    Config(String),

    /// The embedding or chat API failed; carries the upstream message.
    #[error("{0}")]
    Upstream(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RagError {
    fn from(e: reqwest::Error) -> Self {
        RagError::Upstream(e.to_string())
    }
}

impl RagError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RagError::Validation(_))
    }
}
