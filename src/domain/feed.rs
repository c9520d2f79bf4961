use serde::{Deserialize, Serialize};

use super::ids::FeedId;

/// A subscribed feed. Created once its first fetch parsed successfully and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: FeedId,
    pub source_url: String,
    pub title: String,
    pub description: String,
}

impl Feed {
    /// Build a feed from channel metadata, falling back to the source URL
    /// when the channel carries no title.
    pub fn new(
        id: FeedId,
        source_url: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
    ) -> Self {
        let source_url = source_url.into();
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| source_url.clone());

        Self {
            id,
            source_url,
            title,
            description: description.unwrap_or_default(),
        }
    }
}
