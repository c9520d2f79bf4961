//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{AppError, Result};
use crate::fetcher::Fetcher;

#[derive(Clone)]
enum Reply {
    Body(String),
    Fail,
}

/// In-memory [`Fetcher`] with per-URL canned replies and optional latency.
/// Unknown URLs fail with a network error.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: Mutex<HashMap<String, Reply>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Body(body.to_string()));
    }

    pub fn fail(&self, url: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Fail);
    }

    pub fn delay(&self, url: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        // Read the reply after the delay so a script change mid-flight is visible.
        let reply = self.replies.lock().unwrap().get(url).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body.into_bytes()),
            Some(Reply::Fail) => Err(AppError::Network(format!("connection refused: {url}"))),
            None => Err(AppError::Network(format!("no route to {url}"))),
        }
    }
}

/// Minimal RSS 2.0 document; `items` are `(guid, title)` pairs.
pub fn rss_document(title: &str, items: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (guid, item_title) in items {
        body.push_str(&format!(
            "<item><title>{item_title}</title><link>https://example.com/{guid}</link>\
             <description>About {item_title}</description><guid>{guid}</guid></item>"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <rss version=\"2.0\"><channel><title>{title}</title>\
         <description>{title} description</description>\
         <link>https://example.com</link>{body}</channel></rss>"
    )
}
