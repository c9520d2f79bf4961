use std::rc::Rc;
use std::sync::Arc;

use crate::actions::{self, SubmitOutcome};
use crate::app::error::Result;
use crate::config::Config;
use crate::domain::{IdSequence, PostId};
use crate::fetcher::{Fetcher, HttpFetcher, ParallelFetcher, DEFAULT_WORKERS};
use crate::locale::Locale;
use crate::normalizer::Normalizer;
use crate::poller::{self, PollHandle, PollLoop, PollReport, PollSettings};
use crate::state::Store;

/// Wires the store to the fetching pipeline. Lives on a single thread.
pub struct App {
    pub store: Rc<Store>,
    pub fetcher: ParallelFetcher,
    pub normalizer: Normalizer,
    pub ids: IdSequence,
    pub locale: Locale,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetch)?);
        Ok(Self::with_fetcher(fetcher, config.poll.workers)
            .with_locale(config.ui.locale))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            store: Rc::new(Store::new()),
            fetcher: ParallelFetcher::with_workers(fetcher, workers),
            normalizer: Normalizer::new(),
            ids: IdSequence::new(),
            locale: Locale::default(),
        }
    }

    pub fn in_memory(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_fetcher(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub async fn submit(&self, raw_url: &str) -> SubmitOutcome {
        actions::submit(self, raw_url).await
    }

    pub fn reset_form(&self) {
        actions::reset_form(&self.store);
    }

    pub fn select_post(&self, post_id: PostId) -> bool {
        actions::select_post(&self.store, post_id)
    }

    pub fn deselect_post(&self) {
        actions::deselect_post(&self.store);
    }

    pub async fn poll_once(&self) -> PollReport {
        poller::poll_once(self).await
    }

    /// Start the background refresh loop on the current `LocalSet`.
    pub fn start_polling(self: &Rc<Self>, settings: PollSettings) -> PollHandle {
        PollLoop::spawn(self.clone(), settings)
    }
}
