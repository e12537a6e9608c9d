use crate::types::{AggregatorError, FetchConfig, Result};
use backoff::{backoff::Backoff, ExponentialBackoff};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use url::Url;

/// HTTP transport for feeds and article pages.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    rate_limiter: Arc<RwLock<HashMap<String, Instant>>>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self {
            client,
            config,
            rate_limiter: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Download a feed document, retrying transport errors and non-success statuses.
    pub async fn fetch_feed(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        self.apply_rate_limit(url).await?;

        let mut backoff = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 32),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.retry_delay_seconds * 60)),
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if !status.is_success() {
                        last_error = Some(AggregatorError::General(format!(
                            "HTTP {}: {}",
                            status,
                            status.canonical_reason().unwrap_or("Unknown")
                        )));
                    } else {
                        self.check_size(&response)?;
                        match response.text().await {
                            Ok(content) => {
                                info!(
                                    "Fetched feed: {} ({} bytes, {}ms)",
                                    url,
                                    content.len(),
                                    start_time.elapsed().as_millis()
                                );
                                return Ok(content);
                            }
                            Err(e) => last_error = Some(AggregatorError::Http(e)),
                        }
                    }
                }
                Err(e) => last_error = Some(AggregatorError::Http(e)),
            }

            if attempt < self.config.max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, url, delay);
                    tokio::time::sleep(delay).await;
                    continue;
                }
            }
            break;
        }

        error!("Failed to fetch feed after {} attempts: {}", self.config.max_retries + 1, url);
        Err(last_error.unwrap_or_else(|| AggregatorError::General("Unknown error".to_string())))
    }

    /// Download an article page. Single attempt, failures fall back to feed content.
    pub async fn fetch_full_content(&self, url: &str) -> Result<String> {
        debug!("Fetching full content from: {}", url);

        self.apply_rate_limit(url).await?;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AggregatorError::General(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content = response.text().await?;
        Ok(content)
    }

    fn check_size(&self, response: &Response) -> Result<()> {
        if let Some(content_length) = response.content_length() {
            let size_mb = content_length as usize / (1024 * 1024);
            if size_mb > self.config.max_feed_size_mb {
                return Err(AggregatorError::FeedTooLarge { size_mb });
            }
        }
        Ok(())
    }

    async fn apply_rate_limit(&self, url: &str) -> Result<()> {
        let parsed_url = Url::parse(url)?;
        let host = parsed_url.host_str().unwrap_or("").to_string();
        let min_interval = Duration::from_millis(self.config.min_host_interval_ms);

        let mut rate_limiter = self.rate_limiter.write().await;

        if let Some(last_request) = rate_limiter.get(&host) {
            let elapsed = last_request.elapsed();
            if elapsed < min_interval {
                let wait_time = min_interval - elapsed;
                debug!("Rate limiting {}: waiting {:?}", host, wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        rate_limiter.insert(host, Instant::now());
        Ok(())
    }
}
