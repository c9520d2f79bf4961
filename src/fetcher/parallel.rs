use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{AppError, Result};
use crate::domain::FeedId;
use crate::fetcher::Fetcher;
use crate::normalizer::{Normalizer, ParsedFeed};

pub const DEFAULT_WORKERS: usize = 10;

/// A feed to refresh: its id and the URL it was subscribed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub feed_id: FeedId,
    pub url: String,
}

/// Fetches and parses many feeds concurrently, at most `workers` at a time.
///
/// Every source gets its own result; one failure never affects another.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetch and parse a single URL.
    pub async fn fetch_one(&self, url: &str, normalizer: &Normalizer) -> Result<ParsedFeed> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| AppError::Other(e.to_string()))?;

        fetch_and_parse(self.fetcher.as_ref(), url, normalizer).await
    }

    /// Settle-all fan-out: resolves once every source has either produced a
    /// parsed feed or failed. Results keep the order of `sources`.
    pub async fn fetch_all(
        &self,
        sources: Vec<FeedSource>,
        normalizer: &Normalizer,
    ) -> Vec<(FeedId, Result<ParsedFeed>)> {
        let tasks = sources.into_iter().map(|source| async move {
            let result = self.fetch_one(&source.url, normalizer).await;
            (source.feed_id, result)
        });

        join_all(tasks).await
    }
}

async fn fetch_and_parse(
    fetcher: &(dyn Fetcher + Send + Sync),
    url: &str,
    normalizer: &Normalizer,
) -> Result<ParsedFeed> {
    let body = fetcher.fetch(url).await?;
    normalizer.normalize(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FailureKind;
    use crate::testing::{rss_document, ScriptedFetcher};

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond("https://a.example/rss", &rss_document("A", &[("1", "one")]));
        fetcher.fail("https://b.example/rss");
        fetcher.respond("https://c.example/rss", "<html><body>nope</body></html>");

        let parallel = ParallelFetcher::with_workers(fetcher.clone(), 2);
        let sources = vec![
            FeedSource {
                feed_id: FeedId::new(1),
                url: "https://a.example/rss".into(),
            },
            FeedSource {
                feed_id: FeedId::new(2),
                url: "https://b.example/rss".into(),
            },
            FeedSource {
                feed_id: FeedId::new(3),
                url: "https://c.example/rss".into(),
            },
        ];

        let results = parallel.fetch_all(sources, &Normalizer::new()).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, FeedId::new(1));
        assert_eq!(results[0].1.as_ref().map(|f| f.items.len()).ok(), Some(1));
        assert_eq!(
            results[1].1.as_ref().err().map(AppError::failure_kind),
            Some(FailureKind::Network)
        );
        assert_eq!(
            results[2].1.as_ref().err().map(AppError::failure_kind),
            Some(FailureKind::Parse)
        );
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_empty() {
        let parallel = ParallelFetcher::new(Arc::new(ScriptedFetcher::new()));
        let results = parallel.fetch_all(Vec::new(), &Normalizer::new()).await;
        assert!(results.is_empty());
    }
}
