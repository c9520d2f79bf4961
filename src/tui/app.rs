use ratatui::widgets::ListState;

use crate::view::{PostRow, Regions, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Feeds,
    Posts,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Feeds => ActivePane::Posts,
            ActivePane::Posts => ActivePane::Feeds,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Terminal-local state: cursor positions and the input buffer. Everything
/// else is read from the view model at draw time.
pub struct TuiApp {
    pub active_pane: ActivePane,
    pub editing: bool,
    pub input: String,
    pub feed_list_state: ListState,
    pub post_list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
    redraw: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            active_pane: ActivePane::Posts,
            editing: false,
            input: String::new(),
            feed_list_state: ListState::default(),
            post_list_state: ListState::default(),
            should_quit: false,
            status_message: None,
            redraw: true,
        }
    }

    fn list_state(&mut self) -> &mut ListState {
        match self.active_pane {
            ActivePane::Feeds => &mut self.feed_list_state,
            ActivePane::Posts => &mut self.post_list_state,
        }
    }

    fn active_len(&self, regions: &Regions) -> usize {
        match self.active_pane {
            ActivePane::Feeds => regions.feeds.len(),
            ActivePane::Posts => regions.posts.len(),
        }
    }

    pub fn move_up(&mut self, regions: &Regions) {
        if self.active_len(regions) == 0 {
            return;
        }
        let state = self.list_state();
        let index = state.selected().unwrap_or(0);
        state.select(Some(index.saturating_sub(1)));
    }

    pub fn move_down(&mut self, regions: &Regions) {
        let len = self.active_len(regions);
        if len == 0 {
            return;
        }
        let state = self.list_state();
        let index = state.selected().map_or(0, |i| (i + 1).min(len - 1));
        state.select(Some(index));
    }

    /// Keep both cursors inside their lists as the lists change.
    pub fn clamp(&mut self, regions: &Regions) {
        clamp_state(&mut self.feed_list_state, regions.feeds.len());
        clamp_state(&mut self.post_list_state, regions.posts.len());
    }

    pub fn selected_post<'a>(&self, regions: &'a Regions) -> Option<&'a PostRow> {
        self.post_list_state
            .selected()
            .and_then(|index| regions.posts.get(index))
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Note a local change (key press, resize) that needs a new frame.
    pub fn mark_redraw(&mut self) {
        self.redraw = true;
    }

    /// True if a frame is due, either for a local change or because the
    /// view model was re-rendered. Resets both.
    pub fn take_redraw(&mut self, view: &ViewModel) -> bool {
        let dirty = view.take_dirty();
        std::mem::replace(&mut self.redraw, false) || dirty
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_state(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(index), len) if index >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::app::FailureKind;
    use crate::domain::{FeedId, LoadingState, PostId};
    use crate::locale::Locale;
    use crate::state::{SliceUpdate, Store};
    use crate::view::bind_view;

    fn regions_with_posts(count: u64) -> Regions {
        Regions {
            posts: (1..=count)
                .map(|id| PostRow {
                    id: PostId::new(id),
                    feed_id: FeedId::new(1),
                    title: format!("Post {id}"),
                    link: None,
                    published_at: None,
                    unread: true,
                })
                .collect(),
            ..Regions::default()
        }
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let regions = regions_with_posts(2);
        let mut app = TuiApp::new();
        app.clamp(&regions);

        app.move_up(&regions);
        assert_eq!(app.post_list_state.selected(), Some(0));
        app.move_down(&regions);
        app.move_down(&regions);
        assert_eq!(app.post_list_state.selected(), Some(1));
        assert_eq!(
            app.selected_post(&regions).map(|p| p.id),
            Some(PostId::new(2))
        );
    }

    #[test]
    fn test_clamp_follows_list_changes() {
        let mut app = TuiApp::new();
        app.clamp(&Regions::default());
        assert_eq!(app.post_list_state.selected(), None);

        app.clamp(&regions_with_posts(3));
        assert_eq!(app.post_list_state.selected(), Some(0));
    }

    #[test]
    fn test_pane_cycle() {
        assert_eq!(ActivePane::Feeds.next(), ActivePane::Posts);
        assert_eq!(ActivePane::Posts.next(), ActivePane::Feeds);
        assert_eq!(ActivePane::Posts.prev(), ActivePane::Feeds);
    }

    #[test]
    fn test_redraw_only_when_something_changed() {
        let store = Store::new();
        let view = Rc::new(ViewModel::new(Locale::En));
        bind_view(&store, view.clone());
        let mut app = TuiApp::new();

        assert!(app.take_redraw(&view));
        assert!(!app.take_redraw(&view));

        store.set(SliceUpdate::Loading(LoadingState::Failed(FailureKind::Network)));
        assert!(app.take_redraw(&view));
        assert!(!app.take_redraw(&view));

        app.mark_redraw();
        assert!(app.take_redraw(&view));
        assert!(!app.take_redraw(&view));
    }
}
