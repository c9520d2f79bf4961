use chrono::{DateTime, Utc};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{AppError, Result};
use crate::domain::{FeedId, Post, PostId};

/// Channel-level data of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Vec<ParsedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub guid: String,
}

impl ParsedItem {
    pub fn into_post(self, id: PostId, feed_id: FeedId) -> Post {
        Post {
            id,
            feed_id,
            title: self.title,
            description: self.description,
            link: self.link,
            published_at: self.published_at,
            guid: self.guid,
        }
    }
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<ParsedFeed> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::FeedParse("Empty document".into()));
        }

        // Entries without an id come back with an empty one so the fallback
        // below stays deterministic across polls.
        let feed = parser::Builder::new()
            .id_generator(|_links, _title, _uri| String::new())
            .build()
            .parse(body)
            .map_err(|e| AppError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let link = entry.links.first().map(|l| l.href.clone());
                let title = entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default();
                let description = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body))
                    .map(|d| decode_html_entities(&d).to_string())
                    .unwrap_or_default();

                let guid = if !entry.id.trim().is_empty() {
                    entry.id
                } else if let Some(link) = &link {
                    link.clone()
                } else {
                    Post::content_key(&title, &description)
                };

                ParsedItem {
                    title,
                    description,
                    link,
                    published_at: entry
                        .published
                        .or(entry.updated)
                        .map(|dt| dt.with_timezone(&Utc)),
                    guid,
                }
            })
            .collect();

        Ok(ParsedFeed {
            title: feed
                .title
                .map(|t| decode_html_entities(&t.content).to_string()),
            description: feed
                .description
                .map(|d| decode_html_entities(&d.content).to_string()),
            items,
        })
    }
}
