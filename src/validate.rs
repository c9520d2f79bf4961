//! Input checks for submitted feed URLs.

use thiserror::Error;
use url::Url;

use crate::domain::Feed;
use crate::locale::MessageKey;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is required")]
    Required,

    #[error("URL is not a valid absolute URL")]
    InvalidUrl,

    #[error("Feed is already subscribed")]
    Exists,
}

impl ValidationError {
    pub fn message_key(self) -> MessageKey {
        match self {
            ValidationError::Required => MessageKey::Required,
            ValidationError::InvalidUrl => MessageKey::InvalidUrl,
            ValidationError::Exists => MessageKey::Exists,
        }
    }
}

/// Validate a raw submission against the current feed list, returning the
/// trimmed URL to fetch.
pub fn validate_feed_url<'a>(raw: &'a str, feeds: &[Feed]) -> Result<&'a str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }

    let parsed = Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl)?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) || !parsed.has_host() {
        return Err(ValidationError::InvalidUrl);
    }

    if feeds.iter().any(|feed| feed.source_url == trimmed) {
        return Err(ValidationError::Exists);
    }

    Ok(trimmed)
}
