pub mod state;
pub mod config;
pub mod scrape;
pub mod runner;


pub use state::{CrawledPage, CrawlerState, CrawlerStateRef, build_graph_from_state};
pub use config::{CrawlerConfig, CrawlerConfigRef, LINK_REQUEST_TIMEOUT_SEC};
pub use scrape::{construct_url, normalize_url, scrape_page, scrape_page_with_retries};
pub use runner::crawl;
