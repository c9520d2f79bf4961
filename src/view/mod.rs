//! Render targets driven by store changes.
//!
//! A [`View`] exposes one render hook per display region. [`bind_view`]
//! registers each hook with the store under the slices that region reads,
//! so a change redraws only what depends on it.

pub mod console;
pub mod model;

pub use console::ConsoleView;
pub use model::{FeedRow, FeedbackLine, FormRegion, ModalContent, PostRow, Regions, ViewModel};

use std::rc::Rc;

use crate::domain::{Feed, FormState, LoadingState, Post, ViewedSet};
use crate::state::{AppState, StatePath, Store, SubscriptionId};

pub trait View {
    fn render_form(&self, form: &FormState);
    fn render_loading(&self, loading: LoadingState);
    fn render_feeds(&self, feeds: &[Feed]);
    fn render_posts(&self, posts: &[Post], viewed: &ViewedSet);
    fn render_modal(&self, post: Option<&Post>);
}

/// Subscribe every region of `view` to the store and draw it once from the
/// current state.
pub fn bind_view<V: View + 'static>(store: &Store, view: Rc<V>) -> Vec<SubscriptionId> {
    let mut ids = Vec::with_capacity(5);

    let v = view.clone();
    ids.push(store.subscribe(&[StatePath::Form], move |state| {
        v.render_form(&state.form)
    }));

    let v = view.clone();
    ids.push(store.subscribe(&[StatePath::Loading], move |state| {
        v.render_loading(state.loading)
    }));

    let v = view.clone();
    ids.push(store.subscribe(&[StatePath::Feeds], move |state| {
        v.render_feeds(&state.feeds)
    }));

    let v = view.clone();
    ids.push(store.subscribe(&[StatePath::Posts, StatePath::Viewed], move |state| {
        v.render_posts(&state.posts, &state.viewed)
    }));

    let v = view.clone();
    ids.push(store.subscribe(&[StatePath::Modal, StatePath::Posts], move |state| {
        v.render_modal(state.selected_post())
    }));

    store.read(|state| render_all(view.as_ref(), state));
    ids
}

pub fn render_all(view: &dyn View, state: &AppState) {
    view.render_form(&state.form);
    view.render_loading(state.loading);
    view.render_feeds(&state.feeds);
    view.render_posts(&state.posts, &state.viewed);
    view.render_modal(state.selected_post());
}
