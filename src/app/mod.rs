pub mod context;
pub mod error;

pub use context::App;
pub use error::{AppError, FailureKind, Result};
