use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{AppError, Result};
use crate::config::FetchConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
    proxy: Option<Url>,
}

/// Body returned by an AllOrigins-style proxy.
#[derive(Debug, Deserialize)]
struct ProxyResponse {
    contents: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let proxy = config
            .proxy
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|e| AppError::Config(format!("Invalid proxy URL {}: {}", raw, e)))
            })
            .transpose()?;

        Ok(Self { client, proxy })
    }

    fn proxied_url(proxy: &Url, target: &str) -> Url {
        let mut endpoint = proxy.clone();
        endpoint
            .query_pairs_mut()
            .append_pair("url", target)
            .append_pair("disableCache", "true");
        endpoint
    }

    async fn fetch_direct(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_via_proxy(&self, proxy: &Url, url: &str) -> Result<Vec<u8>> {
        let endpoint = Self::proxied_url(proxy, url);
        let response = self.client.get(endpoint).send().await?;
        response.error_for_status_ref()?;

        let text = response.text().await?;
        decode_proxy_body(&text)
    }
}

fn decode_proxy_body(text: &str) -> Result<Vec<u8>> {
    let payload: ProxyResponse = serde_json::from_str(text)
        .map_err(|e| AppError::Network(format!("Malformed proxy response: {}", e)))?;

    payload
        .contents
        .map(String::into_bytes)
        .ok_or_else(|| AppError::Network("Proxy response has no contents".into()))
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, proxied = self.proxy.is_some(), "Fetching feed");
        match &self.proxy {
            Some(proxy) => self.fetch_via_proxy(proxy, url).await,
            None => self.fetch_direct(url).await,
        }
    }
}
