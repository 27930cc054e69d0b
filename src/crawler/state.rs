use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::SystemTime;
use anyhow::Result;
use log2::{debug, info, warn};
use tokio::sync::RwLock;
use url::Url;

use super::config::CrawlerConfig;
use crate::error::RankError;
use crate::link_graph::{LinkGraph, RankConfig};

/// A page the crawler fetched together with the links found on it
#[derive(Debug, Clone)]
pub struct CrawledPage {
    pub url: Url,
    pub links: BTreeSet<Url>,
    pub crawled_at: SystemTime,
}

/// Current state of the crawler
pub struct CrawlerState {
    /// Number of pages fetched (or being fetched)
    pub links_crawled_count: AtomicUsize,
    /// Links to crawl in queue, with their depth
    pub link_to_crawl_queue: RwLock<VecDeque<(Url, usize)>>,
    /// Set of visited URLs to prevent cycles
    pub visited_urls: RwLock<HashSet<Url>>,
    /// Successfully scraped pages, in the order they finished
    pub crawled_pages: RwLock<Vec<CrawledPage>>,
}

impl CrawlerState {
    /// Seed the queue with the configured starting URL at depth 0
    pub fn new(config: &CrawlerConfig) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((config.starting_url.clone(), 0));

        Self {
            links_crawled_count: AtomicUsize::new(0),
            link_to_crawl_queue: RwLock::new(queue),
            visited_urls: RwLock::new(HashSet::new()),
            crawled_pages: RwLock::new(Vec::new()),
        }
    }
}

pub type CrawlerStateRef = Arc<CrawlerState>;

/// Replay crawled pages into a link graph.
///
/// Pages are ingested in crawl order. Once a page's outgoing links are
/// connected, the page is ranked and then every link target is re-ranked,
/// since the page's out-degree (and so its share to each target) changed.
pub async fn build_graph_from_state(state: &CrawlerStateRef, rank_config: RankConfig) -> Result<LinkGraph> {
    let pages = state.crawled_pages.read().await;
    let mut graph = LinkGraph::with_config(rank_config)?;

    for page in pages.iter() {
        let page_id = page.url.as_str();
        graph.add_link(page_id);
        for link in &page.links {
            graph.add_connection(page_id, link.as_str());
        }
        graph.update_timestamp(page_id, page.crawled_at)?;

        let mut processed = 0;
        for target in std::iter::once(page_id).chain(page.links.iter().map(Url::as_str)) {
            match graph.update_rank(target) {
                Ok(stats) => processed += stats.processed,
                // ranks written before the limit stay, the remaining pages still get ranked
                Err(e @ RankError::StepLimitExceeded { .. }) => warn!("{}", e),
                Err(e) => return Err(e.into()),
            }
        }
        debug!("Ranked {}: {} nodes recomputed", page_id, processed);
    }

    info!("Graph built from {} pages, {} links known", pages.len(), graph.len());
    Ok(graph)
}
