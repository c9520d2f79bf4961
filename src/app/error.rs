use thiserror::Error;

use crate::locale::MessageKey;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification used for user-facing feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Parse,
    Unknown,
}

impl AppError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AppError::Http(_) | AppError::Network(_) => FailureKind::Network,
            AppError::FeedParse(_) => FailureKind::Parse,
            _ => FailureKind::Unknown,
        }
    }
}

impl FailureKind {
    pub fn message_key(self) -> MessageKey {
        match self {
            FailureKind::Network => MessageKey::Network,
            FailureKind::Parse => MessageKey::InvalidRss,
            FailureKind::Unknown => MessageKey::Unknown,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
