use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YtranslateError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, YtranslateError>;

/// Closed set of ways a run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidUrl,
    TranscriptUnavailable,
    EmptyTranscript,
    TranslationFailed,
    NetworkError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidUrl => write!(f, "invalid url"),
            ErrorKind::TranscriptUnavailable => write!(f, "transcript unavailable"),
            ErrorKind::EmptyTranscript => write!(f, "empty transcript"),
            ErrorKind::TranslationFailed => write!(f, "translation failed"),
            ErrorKind::NetworkError => write!(f, "network error"),
        }
    }
}

/// A run failure, normalized at the stage where it happened.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_url() -> Self {
        Self::new(ErrorKind::InvalidUrl, "Invalid YouTube URL")
    }

    pub fn empty_transcript() -> Self {
        Self::new(ErrorKind::EmptyTranscript, "Transcript empty, cannot translate.")
    }

    /// Transport-level failure: connection refused, DNS, timeout, reset.
    pub fn network(err: &reqwest::Error) -> Self {
        Self::new(ErrorKind::NetworkError, format!("Network error: {}", err))
    }
}
