use std::collections::HashSet;

use crate::app::{App, FailureKind};
use crate::domain::{Feed, FeedId, FormState, FormStatus, IdSequence, LoadingState, Post};
use crate::locale::MessageKey;
use crate::normalizer::ParsedFeed;
use crate::poller::select_new_items;
use crate::state::{SliceUpdate, Store};
use crate::validate::{validate_feed_url, ValidationError};

/// What happened to a submission. The state tree carries the same
/// information for views; this is for callers that are not views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added { feed_id: FeedId, posts: usize },
    Rejected(ValidationError),
    Failed(FailureKind),
}

/// Validate, fetch and subscribe to a feed URL.
///
/// Uniqueness is checked against the feed list as it is when the call
/// starts; two overlapping submissions of the same new URL may both succeed.
pub async fn submit(app: &App, raw_url: &str) -> SubmitOutcome {
    let store = &app.store;

    store.set(SliceUpdate::Form(FormState::with_status(FormStatus::Validating)));

    let validated = store.read(|state| {
        validate_feed_url(raw_url, &state.feeds).map(str::to_owned)
    });
    let url = match validated {
        Ok(url) => url,
        Err(err) => {
            tracing::debug!(input = raw_url, error = %err, "Rejected feed URL");
            store.set(SliceUpdate::Form(FormState::invalid(err.message_key())));
            return SubmitOutcome::Rejected(err);
        }
    };

    store.set_many(vec![
        SliceUpdate::Form(FormState::with_status(FormStatus::Submitting)),
        SliceUpdate::Loading(LoadingState::Loading),
    ]);

    match app.fetcher.fetch_one(&url, &app.normalizer).await {
        Ok(parsed) => {
            let (feed, posts) = build_feed(&app.ids, url, parsed);
            let feed_id = feed.id;
            let count = posts.len();
            tracing::info!(url = %feed.source_url, title = %feed.title, posts = count, "Added feed");

            let (feeds, all_posts) = store.read(|state| {
                let mut feeds = Vec::with_capacity(state.feeds.len() + 1);
                feeds.push(feed);
                feeds.extend(state.feeds.iter().cloned());

                let mut all_posts = state.posts.clone();
                all_posts.extend(posts);
                (feeds, all_posts)
            });

            store.set_many(vec![SliceUpdate::Feeds(feeds), SliceUpdate::Posts(all_posts)]);
            store.set_many(vec![
                SliceUpdate::Form(FormState::submitted(MessageKey::Added)),
                SliceUpdate::Loading(LoadingState::Loaded),
            ]);

            SubmitOutcome::Added {
                feed_id,
                posts: count,
            }
        }
        Err(err) => {
            let kind = err.failure_kind();
            tracing::warn!(url = %url, error = %err, "Failed to add feed");
            store.set_many(vec![
                SliceUpdate::Form(FormState::invalid(kind.message_key())),
                SliceUpdate::Loading(LoadingState::Failed(kind)),
            ]);
            SubmitOutcome::Failed(kind)
        }
    }
}

/// Return the form to its resting state, e.g. once the user edits the input.
pub fn reset_form(store: &Store) {
    store.set(SliceUpdate::Form(FormState::default()));
}

fn build_feed(ids: &IdSequence, url: String, parsed: ParsedFeed) -> (Feed, Vec<Post>) {
    let feed = Feed::new(ids.next_feed(), url, parsed.title, parsed.description);

    let mut seen = HashSet::new();
    let posts = select_new_items(parsed.items, &mut seen)
        .into_iter()
        .map(|item| item.into_post(ids.next_post(), feed.id))
        .collect();

    (feed, posts)
}
