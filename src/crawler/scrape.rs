use anyhow::{anyhow, Result};
use log2::{debug, info, warn};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::config::CrawlerConfig;

/// If `path` is a full URL, returns it as-is. Otherwise constructs a full URL by
/// merging with `root_url`. The result is passed through [`normalize_url`].
pub fn construct_url(path: &str, root_url: &Url) -> Result<Url, url::ParseError> {
    let url = match Url::parse(path) {
        Ok(parsed_url) if parsed_url.host().is_some() => parsed_url,
        _ => root_url.join(path)?,
    };

    Ok(normalize_url(url))
}

/// Strip trailing slashes from the path and drop the fragment,
/// so every spelling of a page maps to one graph node
pub fn normalize_url(mut url: Url) -> Url {
    let trimmed_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed_path);
    url.set_fragment(None);
    url
}

/// Whether a link found on `page` should become an edge of the graph
fn should_follow(page: &Url, link: &Url, config: &CrawlerConfig) -> bool {
    if !matches!(link.scheme(), "http" | "https") {
        return false;
    }
    if link == page {
        return false;
    }
    if config.scraping_foreign_hosts {
        return true;
    }
    match (page.host_str(), link.host_str()) {
        (Some(base), Some(target)) => base == target,
        _ => false,
    }
}

/// Scrape all followable links from the given page.
pub async fn scrape_page(url: Url, client: &Client, config: &CrawlerConfig) -> Result<BTreeSet<Url>> {
    let response = client
        .get(url.clone())
        .timeout(Duration::from_secs(config.request_timeout_sec))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("Failed to fetch page: {}", response.status()));
    }

    let html = response.text().await?;
    let document = Html::parse_document(&html);
    let selector = Selector::parse("a[href]")
        .map_err(|e| anyhow!("Failed to parse <a> selector: {}", e))?;

    let mut found_urls = BTreeSet::new();
    for href in document.select(&selector).filter_map(|element| element.value().attr("href")) {
        let Ok(link) = construct_url(href, &url) else {
            continue;
        };
        if should_follow(&url, &link, config) {
            found_urls.insert(link);
        } else {
            debug!("Skipped link: {}", link);
        }
    }

    info!("Found {} urls on page {}", found_urls.len(), url);

    Ok(found_urls)
}

/// `scrape_page`, retried up to `config.max_retries` more times with the request delay in between
pub async fn scrape_page_with_retries(url: Url, client: &Client, config: &CrawlerConfig) -> Result<BTreeSet<Url>> {
    let mut attempt = 0;
    loop {
        match scrape_page(url.clone(), client, config).await {
            Ok(found_urls) => return Ok(found_urls),
            Err(e) if attempt < config.max_retries => {
                attempt += 1;
                warn!("Attempt {} for {} failed: {}. Retrying", attempt, url, e);
                sleep(Duration::from_millis(config.request_delay_ms)).await;
            }
            Err(e) => return Err(e.context(format!("giving up on {} after {} attempts", url, attempt + 1))),
        }
    }
}
