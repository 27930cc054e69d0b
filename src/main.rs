use link_ranker::{config, crawler, report};

use log2::*;
use anyhow::Result;
use url::Url;
use std::sync::Arc;
use std::time::Instant;

/// Indicates start time of a project, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("link_ranker")) // include only modules having this pattern
        .compress(false)
        .level(cfg.log_level.to_string())
        .start();

    let start_url = Url::parse(&cfg.start_url)?;
    let crawler_config = Arc::new(cfg.crawler_config(start_url));
    let state = Arc::new(crawler::CrawlerState::new(&crawler_config));

    if let Err(e) = crawler::crawl(state.clone(), crawler_config).await {
        error!("Crawling failed: {}", e);
        return Err(e);
    }
    let pages_crawled = state.links_crawled_count.load(std::sync::atomic::Ordering::Relaxed);
    debug!("Crawling completed. Pages fetched: {}", pages_crawled);

    let graph = crawler::build_graph_from_state(&state, cfg.rank_config()).await?;
    let entries = report::sorted_ranks(&graph.get_all_ranks());
    report::print_ranks(&entries, cfg.top);

    if let Some(path) = &cfg.output_file {
        report::write_ranks_json(path, &entries)?;
        info!("Ranks written to {:?}", path);
    }

    info!("Done in {:.2?}", START_TIME.elapsed());
    Ok(())
}
