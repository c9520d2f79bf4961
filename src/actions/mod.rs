//! User-initiated operations on the state tree.

pub mod select;
pub mod submit;

pub use select::{deselect_post, select_post};
pub use submit::{reset_form, submit, SubmitOutcome};
