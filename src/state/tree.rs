use crate::domain::{Feed, FeedId, FormState, LoadingState, ModalState, Post, PostId, ViewedSet};

/// Named slices of the state tree. Render callbacks declare their
/// dependencies in terms of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatePath {
    Form,
    Loading,
    Feeds,
    Posts,
    Modal,
    Viewed,
}

/// Replacement value for exactly one slice.
#[derive(Debug, Clone)]
pub enum SliceUpdate {
    Form(FormState),
    Loading(LoadingState),
    Feeds(Vec<Feed>),
    Posts(Vec<Post>),
    Modal(ModalState),
    Viewed(ViewedSet),
}

impl SliceUpdate {
    pub fn path(&self) -> StatePath {
        match self {
            SliceUpdate::Form(_) => StatePath::Form,
            SliceUpdate::Loading(_) => StatePath::Loading,
            SliceUpdate::Feeds(_) => StatePath::Feeds,
            SliceUpdate::Posts(_) => StatePath::Posts,
            SliceUpdate::Modal(_) => StatePath::Modal,
            SliceUpdate::Viewed(_) => StatePath::Viewed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub form: FormState,
    pub loading: LoadingState,
    /// Most recently added first.
    pub feeds: Vec<Feed>,
    /// In merge order; views sort for display.
    pub posts: Vec<Post>,
    pub modal: ModalState,
    pub viewed: ViewedSet,
}

impl AppState {
    pub(crate) fn apply(&mut self, update: SliceUpdate) -> StatePath {
        let path = update.path();
        match update {
            SliceUpdate::Form(form) => self.form = form,
            SliceUpdate::Loading(loading) => self.loading = loading,
            SliceUpdate::Feeds(feeds) => self.feeds = feeds,
            SliceUpdate::Posts(posts) => self.posts = posts,
            SliceUpdate::Modal(modal) => self.modal = modal,
            SliceUpdate::Viewed(viewed) => self.viewed = viewed,
        }
        path
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn posts_for_feed(&self, feed_id: FeedId) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(move |post| post.feed_id == feed_id)
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.modal.selected.and_then(|id| self.post(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormStatus;

    #[test]
    fn test_apply_reports_path() {
        let mut state = AppState::default();
        let path = state.apply(SliceUpdate::Form(FormState::with_status(
            FormStatus::Submitting,
        )));
        assert_eq!(path, StatePath::Form);
        assert_eq!(state.form.status, FormStatus::Submitting);

        let path = state.apply(SliceUpdate::Loading(LoadingState::Loading));
        assert_eq!(path, StatePath::Loading);
        assert_eq!(state.loading, LoadingState::Loading);
    }

    #[test]
    fn test_selected_post_requires_existing_post() {
        let mut state = AppState::default();
        state.modal.selected = Some(PostId::new(9));
        assert!(state.selected_post().is_none());
    }
}
