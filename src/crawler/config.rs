use std::sync::Arc;
use url::Url;

use super::scrape::normalize_url;

/// Default timeout for link requests in seconds
pub const LINK_REQUEST_TIMEOUT_SEC: u64 = 2;

/// Configuration for the crawler
pub struct CrawlerConfig {
    /// Normalized like every discovered link, and the seed of the crawl queue
    pub starting_url: Url,
    pub scraping_foreign_hosts: bool,
    pub max_urls: usize,
    pub max_depth: usize,
    pub thread_count: usize,
    pub request_delay_ms: u64,
    /// Extra attempts after a failed fetch
    pub max_retries: usize,
    pub request_timeout_sec: u64,
}

impl CrawlerConfig {
    pub fn new(starting_url: Url) -> Self {
        Self {
            starting_url: normalize_url(starting_url),
            scraping_foreign_hosts: false,
            max_urls: 10,
            max_depth: 3,
            thread_count: 2,
            request_delay_ms: 100,
            max_retries: 2,
            request_timeout_sec: LINK_REQUEST_TIMEOUT_SEC,
        }
    }

    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_foreign_hosts(mut self, allow: bool) -> Self {
        self.scraping_foreign_hosts = allow;
        self
    }

    pub fn with_request_delay(mut self, delay_ms: u64) -> Self {
        self.request_delay_ms = delay_ms;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
