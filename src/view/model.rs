use std::cell::{Cell, Ref, RefCell};

use chrono::{DateTime, Utc};

use super::View;
use crate::domain::{Feed, FeedId, FormState, FormStatus, LoadingState, Post, PostId, ViewedSet};
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackLine {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRegion {
    /// Input refuses edits and resubmission.
    pub locked: bool,
    pub feedback: Option<FeedbackLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub id: FeedId,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: PostId,
    pub feed_id: FeedId,
    pub title: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Rendered bold until the post is opened.
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub post_id: PostId,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    pub form: FormRegion,
    pub loading: LoadingState,
    pub feeds: Vec<FeedRow>,
    /// Newest first; undated posts last, in merge order.
    pub posts: Vec<PostRow>,
    pub modal: Option<ModalContent>,
}

/// Display-ready projection of the state tree, consumed by the terminal UI.
pub struct ViewModel {
    locale: Locale,
    regions: RefCell<Regions>,
    clear_input: Cell<bool>,
    dirty: Cell<bool>,
}

impl ViewModel {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            regions: RefCell::new(Regions::default()),
            clear_input: Cell::new(false),
            dirty: Cell::new(true),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn regions(&self) -> Ref<'_, Regions> {
        self.regions.borrow()
    }

    /// True once after a submission succeeded; the input should be emptied.
    pub fn take_clear_input(&self) -> bool {
        self.clear_input.replace(false)
    }

    /// True if any region changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    fn update(&self, f: impl FnOnce(&mut Regions)) {
        f(&mut self.regions.borrow_mut());
        self.dirty.set(true);
    }
}

impl View for ViewModel {
    fn render_form(&self, form: &FormState) {
        if form.status == FormStatus::Submitted {
            self.clear_input.set(true);
        }
        let feedback = form.feedback.map(|feedback| FeedbackLine {
            text: self.locale.text(feedback.key()).to_string(),
            is_error: feedback.is_error(),
        });
        self.update(|regions| {
            regions.form = FormRegion {
                locked: form.status.is_busy(),
                feedback,
            }
        });
    }

    fn render_loading(&self, loading: LoadingState) {
        self.update(|regions| regions.loading = loading);
    }

    fn render_feeds(&self, feeds: &[Feed]) {
        let rows = feeds
            .iter()
            .map(|feed| FeedRow {
                id: feed.id,
                title: feed.title.clone(),
                description: feed.description.clone(),
            })
            .collect();
        self.update(|regions| regions.feeds = rows);
    }

    fn render_posts(&self, posts: &[Post], viewed: &ViewedSet) {
        let mut rows: Vec<PostRow> = posts
            .iter()
            .map(|post| PostRow {
                id: post.id,
                feed_id: post.feed_id,
                title: post.display_title().to_string(),
                link: post.link.clone(),
                published_at: post.published_at,
                unread: !viewed.contains(post.id),
            })
            .collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        self.update(|regions| regions.posts = rows);
    }

    fn render_modal(&self, post: Option<&Post>) {
        let modal = post.map(|post| ModalContent {
            post_id: post.id,
            title: post.display_title().to_string(),
            description: post.description.clone(),
            link: post.link.clone(),
        });
        self.update(|regions| regions.modal = modal);
    }
}
