use std::collections::{HashMap, HashSet};

use crate::domain::{FeedId, IdSequence, Post};
use crate::normalizer::ParsedItem;

/// Keep the items whose guid is not in `known`, recording each kept guid so
/// repeats later in the same batch are dropped too.
pub fn select_new_items(items: Vec<ParsedItem>, known: &mut HashSet<String>) -> Vec<ParsedItem> {
    items
        .into_iter()
        .filter(|item| known.insert(item.guid.clone()))
        .collect()
}

/// Turn freshly fetched items into posts that are not yet in `existing`.
///
/// Known guids are computed once from `existing`, so the result does not
/// depend on the order in which feeds finished fetching.
pub fn collect_new_posts(
    existing: &[Post],
    fetched: Vec<(FeedId, Vec<ParsedItem>)>,
    ids: &IdSequence,
) -> Vec<Post> {
    let mut known: HashMap<FeedId, HashSet<String>> = HashMap::new();
    for post in existing {
        known
            .entry(post.feed_id)
            .or_default()
            .insert(post.guid.clone());
    }

    let mut new_posts = Vec::new();
    for (feed_id, items) in fetched {
        let seen = known.entry(feed_id).or_default();
        for item in select_new_items(items, seen) {
            new_posts.push(item.into_post(ids.next_post(), feed_id));
        }
    }
    new_posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostId;

    fn item(guid: &str) -> ParsedItem {
        ParsedItem {
            title: format!("Title {guid}"),
            description: String::new(),
            link: None,
            published_at: None,
            guid: guid.to_string(),
        }
    }

    fn post(id: u64, feed: u64, guid: &str) -> Post {
        item(guid).into_post(PostId::new(id), FeedId::new(feed))
    }

    #[test]
    fn test_only_unknown_guids_are_new() {
        let existing = vec![post(1, 1, "1"), post(2, 1, "2")];
        let ids = IdSequence::new();

        let new_posts = collect_new_posts(
            &existing,
            vec![(FeedId::new(1), vec![item("1"), item("2"), item("3")])],
            &ids,
        );

        assert_eq!(new_posts.len(), 1);
        assert_eq!(new_posts[0].guid, "3");
        assert_eq!(new_posts[0].feed_id, FeedId::new(1));
    }

    #[test]
    fn test_unchanged_content_yields_nothing() {
        let existing = vec![post(1, 1, "a"), post(2, 1, "b")];
        let new_posts = collect_new_posts(
            &existing,
            vec![(FeedId::new(1), vec![item("a"), item("b")])],
            &IdSequence::new(),
        );
        assert!(new_posts.is_empty());
    }

    #[test]
    fn test_guids_are_scoped_per_feed() {
        let existing = vec![post(1, 1, "shared")];
        let new_posts = collect_new_posts(
            &existing,
            vec![
                (FeedId::new(1), vec![item("shared")]),
                (FeedId::new(2), vec![item("shared")]),
            ],
            &IdSequence::new(),
        );

        assert_eq!(new_posts.len(), 1);
        assert_eq!(new_posts[0].feed_id, FeedId::new(2));
    }

    #[test]
    fn test_duplicates_within_batch_collapse() {
        let new_posts = collect_new_posts(
            &[],
            vec![(FeedId::new(1), vec![item("x"), item("x"), item("y")])],
            &IdSequence::new(),
        );
        let guids: Vec<&str> = new_posts.iter().map(|p| p.guid.as_str()).collect();
        assert_eq!(guids, vec!["x", "y"]);
    }

    #[test]
    fn test_feed_order_does_not_change_selection() {
        let existing = vec![post(1, 1, "a"), post(2, 2, "b")];
        let batch_a = (FeedId::new(1), vec![item("a"), item("a2")]);
        let batch_b = (FeedId::new(2), vec![item("b"), item("b2")]);

        let forward = collect_new_posts(
            &existing,
            vec![batch_a.clone(), batch_b.clone()],
            &IdSequence::new(),
        );
        let backward = collect_new_posts(&existing, vec![batch_b, batch_a], &IdSequence::new());

        let mut forward: Vec<_> = forward.into_iter().map(|p| (p.feed_id, p.guid)).collect();
        let mut backward: Vec<_> = backward.into_iter().map(|p| (p.feed_id, p.guid)).collect();
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward);
    }
}
