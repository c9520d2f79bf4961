use std::cell::RefCell;
use std::collections::HashSet;
use std::io::{self, Write};

use super::View;
use crate::domain::{Feed, FeedId, FormState, FormStatus, LoadingState, Post, PostId, ViewedSet};
use crate::locale::Locale;

/// Line-oriented view for headless runs: prints feeds and posts the first
/// time they appear, and the outcome of each submission.
pub struct ConsoleView<W: Write> {
    out: RefCell<W>,
    locale: Locale,
    seen_feeds: RefCell<HashSet<FeedId>>,
    seen_posts: RefCell<HashSet<PostId>>,
}

impl ConsoleView<io::Stdout> {
    pub fn stdout(locale: Locale) -> Self {
        Self::new(io::stdout(), locale)
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W, locale: Locale) -> Self {
        Self {
            out: RefCell::new(out),
            locale,
            seen_feeds: RefCell::new(HashSet::new()),
            seen_posts: RefCell::new(HashSet::new()),
        }
    }

    fn emit(&self, line: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to console");
        }
    }
}

impl ConsoleView<Vec<u8>> {
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn render_form(&self, form: &FormState) {
        if !matches!(form.status, FormStatus::Invalid | FormStatus::Submitted) {
            return;
        }
        if let Some(feedback) = form.feedback {
            let marker = if feedback.is_error() { "error" } else { "ok" };
            self.emit(&format!("[{marker}] {}", self.locale.text(feedback.key())));
        }
    }

    fn render_loading(&self, loading: LoadingState) {
        tracing::debug!(?loading, "Loading state changed");
    }

    fn render_feeds(&self, feeds: &[Feed]) {
        // Oldest first so the output reads in subscription order.
        for feed in feeds.iter().rev() {
            if self.seen_feeds.borrow_mut().insert(feed.id) {
                self.emit(&format!("# {} <{}>", feed.title, feed.source_url));
                if !feed.description.is_empty() {
                    self.emit(&format!("  {}", feed.description));
                }
            }
        }
    }

    fn render_posts(&self, posts: &[Post], _viewed: &ViewedSet) {
        for post in posts {
            if !self.seen_posts.borrow_mut().insert(post.id) {
                continue;
            }
            let date = post
                .published_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string());
            match &post.link {
                Some(link) => self.emit(&format!("  {date} {} {link}", post.display_title())),
                None => self.emit(&format!("  {date} {}", post.display_title())),
            }
        }
    }

    fn render_modal(&self, _post: Option<&Post>) {}
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::locale::MessageKey;
    use crate::state::{SliceUpdate, Store};
    use crate::view::bind_view;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id: PostId::new(id),
            feed_id: FeedId::new(1),
            title: title.to_string(),
            description: String::new(),
            link: Some(format!("https://example.com/{id}")),
            published_at: None,
            guid: id.to_string(),
        }
    }

    #[test]
    fn test_prints_each_post_once() {
        let store = Store::new();
        let view = Rc::new(ConsoleView::new(Vec::new(), Locale::En));
        bind_view(&store, view.clone());

        store.set(SliceUpdate::Posts(vec![post(1, "First")]));
        store.set(SliceUpdate::Posts(vec![post(1, "First"), post(2, "Second")]));

        let output = view.output();
        assert_eq!(output.matches("First").count(), 1);
        assert!(output.contains("---------- Second https://example.com/2"));
    }

    #[test]
    fn test_prints_feed_and_feedback() {
        let store = Store::new();
        let view = Rc::new(ConsoleView::new(Vec::new(), Locale::En));
        bind_view(&store, view.clone());

        store.set_many(vec![
            SliceUpdate::Feeds(vec![Feed::new(
                FeedId::new(1),
                "https://example.com/rss",
                Some("Example".into()),
                Some("Things".into()),
            )]),
            SliceUpdate::Form(FormState::submitted(MessageKey::Added)),
        ]);
        store.set(SliceUpdate::Form(FormState::invalid(MessageKey::Exists)));

        let output = view.output();
        assert!(output.contains("# Example <https://example.com/rss>"));
        assert!(output.contains("  Things"));
        assert!(output.contains("[ok] RSS loaded successfully"));
        assert!(output.contains("[error] RSS already exists"));
    }

    #[test]
    fn test_intermediate_form_states_are_silent() {
        let store = Store::new();
        let view = Rc::new(ConsoleView::new(Vec::new(), Locale::En));
        bind_view(&store, view.clone());

        store.set(SliceUpdate::Form(FormState::with_status(FormStatus::Validating)));
        store.set(SliceUpdate::Form(FormState::with_status(FormStatus::Submitting)));

        assert_eq!(view.output(), "");
    }
}
