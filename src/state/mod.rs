//! The state tree and its change notifier.

pub mod store;
pub mod tree;

pub use store::{Change, Store, SubscriptionId};
pub use tree::{AppState, SliceUpdate, StatePath};
