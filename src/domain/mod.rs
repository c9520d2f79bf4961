pub mod feed;
pub mod ids;
pub mod post;
pub mod ui;

pub use feed::Feed;
pub use ids::{FeedId, IdSequence, PostId};
pub use post::Post;
pub use ui::{Feedback, FormState, FormStatus, LoadingState, ModalState, ViewedSet};
