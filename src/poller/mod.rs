//! Background refresh of subscribed feeds.
//!
//! One tick fetches every known feed concurrently, waits for all of them to
//! settle and merges whatever is new in a single state change. Failed feeds
//! contribute nothing and are retried on the next tick.

pub mod merge;
pub mod schedule;

pub use merge::{collect_new_posts, select_new_items};
pub use schedule::{PollHandle, PollLoop, PollSettings};

use crate::app::{App, FailureKind};
use crate::fetcher::FeedSource;
use crate::state::SliceUpdate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Feeds that were polled in this tick.
    pub feeds: usize,
    pub new_posts: usize,
    pub failures: Vec<(crate::domain::FeedId, FailureKind)>,
}

/// Run one poll tick and merge its results into the store.
pub async fn poll_once(app: &App) -> PollReport {
    let sources: Vec<FeedSource> = app.store.read(|state| {
        state
            .feeds
            .iter()
            .map(|feed| FeedSource {
                feed_id: feed.id,
                url: feed.source_url.clone(),
            })
            .collect()
    });

    let mut report = PollReport {
        feeds: sources.len(),
        ..PollReport::default()
    };
    if sources.is_empty() {
        return report;
    }

    let results = app.fetcher.fetch_all(sources, &app.normalizer).await;

    let mut fetched = Vec::with_capacity(results.len());
    for (feed_id, result) in results {
        match result {
            Ok(parsed) => fetched.push((feed_id, parsed.items)),
            Err(e) => {
                tracing::warn!(%feed_id, error = %e, "Skipping feed for this tick");
                report.failures.push((feed_id, e.failure_kind()));
            }
        }
    }

    let merged = app.store.read(|state| {
        let new_posts = collect_new_posts(&state.posts, fetched, &app.ids);
        if new_posts.is_empty() {
            return None;
        }
        report.new_posts = new_posts.len();
        let mut posts = Vec::with_capacity(state.posts.len() + new_posts.len());
        posts.extend(state.posts.iter().cloned());
        posts.extend(new_posts);
        Some(posts)
    });

    if let Some(posts) = merged {
        app.store.set(SliceUpdate::Posts(posts));
        tracing::info!(new_posts = report.new_posts, "Merged new posts");
    } else {
        tracing::debug!(feeds = report.feeds, "No new posts");
    }

    report
}
