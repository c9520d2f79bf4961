pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use parallel::{FeedSource, ParallelFetcher, DEFAULT_WORKERS};

/// Retrieves raw feed markup for a URL.
///
/// Transport failures and non-success responses are reported as network
/// errors (`AppError::Http` or `AppError::Network`).
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
