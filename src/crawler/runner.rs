use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;
use anyhow::Result;
use log2::*;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use url::Url;

use super::config::CrawlerConfigRef;
use super::scrape::scrape_page_with_retries;
use super::state::{CrawledPage, CrawlerStateRef};

const IDLE_POLL_MS: u64 = 200;

/// Crawl from the configured starting URL until the queue drains or `max_urls` pages were fetched.
pub async fn crawl(crawler_state_ref: CrawlerStateRef, crawler_cfg_ref: CrawlerConfigRef) -> Result<()> {
    let active_workers = Arc::new(AtomicUsize::new(0));
    let mut handles: Vec<JoinHandle<()>> = Vec::new();

    for worker_id in 0..crawler_cfg_ref.thread_count {
        let state = Arc::clone(&crawler_state_ref);
        let config = Arc::clone(&crawler_cfg_ref);
        let active_workers = Arc::clone(&active_workers);

        let handle = tokio::spawn(async move {
            let client = Client::new();
            info!("Worker {} started", worker_id);

            loop {
                // popping and marking busy happen under the queue lock so idle
                // workers never see an empty queue while an item is in flight
                let next_item = {
                    let mut queue = state.link_to_crawl_queue.write().await;
                    let item = queue.pop_front();
                    if item.is_some() {
                        active_workers.fetch_add(1, Ordering::SeqCst);
                    }
                    item
                };

                let Some((url, depth)) = next_item else {
                    sleep(Duration::from_millis(IDLE_POLL_MS)).await;

                    let idle = active_workers.load(Ordering::SeqCst) == 0;
                    let queue_empty = state.link_to_crawl_queue.read().await.is_empty();

                    if idle && queue_empty {
                        info!("Worker {}: Queue empty and all workers idle. Shutting down.", worker_id);
                        break;
                    }
                    continue;
                };

                let keep_going = crawl_one(worker_id, url, depth, &state, &config, &client).await;
                active_workers.fetch_sub(1, Ordering::SeqCst);
                if !keep_going {
                    break;
                }
            }

            info!("Worker {} finished", worker_id);
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.await?;
    }

    Ok(())
}

/// Process one queue item. Returns `false` once the page budget is spent.
async fn crawl_one(
    worker_id: usize,
    url: Url,
    depth: usize,
    state: &CrawlerStateRef,
    config: &CrawlerConfigRef,
    client: &Client,
) -> bool {
    if depth >= config.max_depth {
        debug!("Worker {}: Max depth {} reached for {}", worker_id, config.max_depth, url);
        return true;
    }

    if !state.visited_urls.write().await.insert(url.clone()) {
        return true;
    }

    // reserve a slot in the page budget before fetching
    let reserved = state.links_crawled_count.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
        (count < config.max_urls).then_some(count + 1)
    });
    if reserved.is_err() {
        info!("Worker {}: Max URLs reached", worker_id);
        return false;
    }

    info!("Worker {}: Crawling {} at depth {}", worker_id, url, depth);

    match scrape_page_with_retries(url.clone(), client, config).await {
        Ok(found_urls) => {
            {
                let mut queue = state.link_to_crawl_queue.write().await;
                for found_url in &found_urls {
                    queue.push_back((found_url.clone(), depth + 1));
                }
            }

            state.crawled_pages.write().await.push(CrawledPage {
                url,
                links: found_urls,
                crawled_at: SystemTime::now(),
            });

            if config.request_delay_ms > 0 {
                sleep(Duration::from_millis(config.request_delay_ms)).await;
            }
        }
        Err(e) => {
            debug!("Worker {}: Failed to scrape {}: {:#}", worker_id, url, e);
        }
    }

    true
}
