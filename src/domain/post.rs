use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ids::{FeedId, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub feed_id: FeedId,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// De-duplication key, unique per feed.
    pub guid: String,
}

impl Post {
    /// Derive a stable key from the item text for entries that carry
    /// neither a guid nor a link.
    pub fn content_key(title: &str, description: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update([0u8]);
        hasher.update(description.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
