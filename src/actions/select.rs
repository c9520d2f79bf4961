use crate::domain::{ModalState, PostId};
use crate::state::{SliceUpdate, Store};

/// Open the detail view for a post and mark it as viewed, as one change.
///
/// Returns `false` (and changes nothing) for an id that is not in the post
/// list.
pub fn select_post(store: &Store, post_id: PostId) -> bool {
    let updates = store.read(|state| {
        state.post(post_id)?;

        let mut updates = vec![SliceUpdate::Modal(ModalState {
            selected: Some(post_id),
        })];
        if !state.viewed.contains(post_id) {
            let mut viewed = state.viewed.clone();
            viewed.insert(post_id);
            updates.push(SliceUpdate::Viewed(viewed));
        }
        Some(updates)
    });

    match updates {
        Some(updates) => {
            store.set_many(updates);
            true
        }
        None => {
            tracing::warn!(%post_id, "Ignoring selection of unknown post");
            false
        }
    }
}

pub fn deselect_post(store: &Store) {
    if store.read(|state| state.modal.selected.is_some()) {
        store.set(SliceUpdate::Modal(ModalState::default()));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::domain::{FeedId, Post};
    use crate::state::{AppState, StatePath};

    fn store_with_posts(count: u64) -> Store {
        let posts = (1..=count)
            .map(|n| Post {
                id: PostId::new(n),
                feed_id: FeedId::new(100),
                title: format!("Post {n}"),
                description: format!("Body {n}"),
                link: Some(format!("https://example.com/{n}")),
                published_at: None,
                guid: n.to_string(),
            })
            .collect();
        Store::with_state(AppState {
            posts,
            ..AppState::default()
        })
    }

    fn counter(store: &Store, path: StatePath) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        store.subscribe(&[path], move |_| seen.set(seen.get() + 1));
        count
    }

    #[test]
    fn test_select_sets_modal_and_viewed() {
        let store = store_with_posts(2);

        assert!(select_post(&store, PostId::new(2)));

        let state = store.snapshot();
        assert_eq!(state.modal.selected, Some(PostId::new(2)));
        assert!(state.viewed.contains(PostId::new(2)));
        assert_eq!(state.selected_post().map(|p| p.title.as_str()), Some("Post 2"));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_reselecting_leaves_viewed_untouched() {
        let store = store_with_posts(1);
        let viewed_renders = counter(&store, StatePath::Viewed);

        select_post(&store, PostId::new(1));
        deselect_post(&store);
        select_post(&store, PostId::new(1));

        assert_eq!(viewed_renders.get(), 1);
        assert_eq!(store.read(|s| s.viewed.len()), 1);
    }

    #[test]
    fn test_viewed_set_never_shrinks() {
        let store = store_with_posts(3);
        let mut last = 0;
        for id in [1, 2, 2, 3, 1, 3] {
            select_post(&store, PostId::new(id));
            let len = store.read(|s| s.viewed.len());
            assert!(len >= last);
            last = len;
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_unknown_post_is_ignored() {
        let store = store_with_posts(1);
        assert!(!select_post(&store, PostId::new(42)));
        assert_eq!(store.revision(), 0);
        assert!(store.read(|s| s.viewed.is_empty()));
    }

    #[test]
    fn test_deselect() {
        let store = store_with_posts(1);
        let modal_renders = counter(&store, StatePath::Modal);

        deselect_post(&store);
        assert_eq!(modal_renders.get(), 0);

        select_post(&store, PostId::new(1));
        deselect_post(&store);

        assert_eq!(modal_renders.get(), 2);
        assert_eq!(store.read(|s| s.modal.selected), None);
        assert!(store.read(|s| s.viewed.contains(PostId::new(1))));
    }
}
