use thiserror::Error;

/// Errors produced by the bingo engine and its loaders.
#[derive(Debug, Error)]
pub enum BingoError {
    /// Requested meeting type is not in the word bank and the caller asked
    /// for a strict lookup.
    #[error("unknown meeting type: {meeting_type}")]
    UnknownMeetingType { meeting_type: String },

    /// Not enough candidate words to fill a card without repeats.
    #[error("meeting type {meeting_type} has {available} buzzwords, {required} are required")]
    InsufficientWords {
        meeting_type: String,
        available: usize,
        required: usize,
    },

    /// The word bank itself cannot serve generation (e.g. the fallback type
    /// is missing or too small).
    #[error("word bank configuration error: {0}")]
    Configuration(String),

    /// Square or card index outside the valid range.
    #[error("index {index} out of range (len {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Toggle, reset or switch before any card was generated.
    #[error("no card has been generated yet")]
    NoCards,

    /// A boundary request failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to render card image: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings file: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("cannot serialise settings: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl BingoError {
    /// Whether retrying the same call may succeed.
    ///
    /// Only I/O failures are transient; every engine error is a contract or
    /// configuration problem that a retry cannot fix.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BingoError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, BingoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_are_not_retryable() {
        let err = BingoError::InsufficientWords {
            meeting_type: "kickoff".into(),
            available: 3,
            required: 24,
        };
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "meeting type kickoff has 3 buzzwords, 24 are required"
        );
        assert!(!BingoError::InvalidIndex { index: 25, len: 25 }.is_retryable());
    }

    #[test]
    fn io_errors_are_retryable() {
        let err: BingoError = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow").into();
        assert!(err.is_retryable());
    }
}
