use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::crawler::CrawlerConfig;
use crate::link_graph::{RankConfig, DEFAULT_DAMPING_FACTOR, DEFAULT_MAX_STEPS, DEFAULT_RANK_THRESHOLD};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// All program arguments. `CrawlerConfig` and `RankConfig` are derived from it
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about = "Crawl a site and rank its pages by incoming links", long_about = None)]
pub struct Config {
    /// URL the crawl starts from
    #[arg(short, long)]
    pub start_url: String,
    /// Maximum number of pages to fetch
    #[arg(long, default_value = "100")]
    pub max_urls: usize,
    /// Maximum link depth to crawl
    #[arg(long, default_value = "3")]
    pub max_depth: usize,
    /// Number of crawler workers
    #[arg(long, default_value = "4")]
    pub thread_count: usize,
    /// Delay between requests in milliseconds
    #[arg(short, long, default_value = "100")]
    pub request_delay: u64,
    /// Extra attempts for a page that failed to load
    #[arg(long, default_value = "2")]
    pub max_retries: usize,
    /// Follow links that leave the starting host
    #[arg(long)]
    pub foreign_hosts: bool,
    /// Weight of incoming rank versus the base value, in (0, 1)
    #[arg(long, default_value_t = DEFAULT_DAMPING_FACTOR)]
    pub damping_factor: f64,
    /// Relative rank change under which a page counts as converged
    #[arg(long, default_value_t = DEFAULT_RANK_THRESHOLD)]
    pub rank_threshold: f64,
    /// Upper bound on pages recomputed by one rank update
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,
    /// Number of pages listed in the report
    #[arg(long, default_value = "20")]
    pub top: usize,
    /// Write all ranks as JSON to this file
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_urls == 0 {
            anyhow::bail!("max_urls must be greater than 0");
        }
        if self.max_depth == 0 {
            anyhow::bail!("max_depth must be greater than 0");
        }
        if self.thread_count == 0 {
            anyhow::bail!("thread_count must be greater than 0");
        }
        Url::parse(&self.start_url)
            .map_err(|e| anyhow::anyhow!("start_url `{}` is not a valid URL: {}", self.start_url, e))?;
        self.rank_config().validate()?;
        Ok(())
    }

    pub fn rank_config(&self) -> RankConfig {
        RankConfig::new()
            .with_damping_factor(self.damping_factor)
            .with_rank_threshold(self.rank_threshold)
            .with_max_steps(self.max_steps)
    }

    pub fn crawler_config(&self, start_url: Url) -> CrawlerConfig {
        CrawlerConfig::new(start_url)
            .with_max_urls(self.max_urls)
            .with_max_depth(self.max_depth)
            .with_thread_count(self.thread_count)
            .with_request_delay(self.request_delay)
            .with_max_retries(self.max_retries)
            .with_foreign_hosts(self.foreign_hosts)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("link_ranker").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(&["--start-url", "https://example.com"]);
        assert_eq!(cfg.max_urls, 100);
        assert_eq!(cfg.max_depth, 3);
        assert_eq!(cfg.thread_count, 4);
        assert_eq!(cfg.damping_factor, 0.85);
        assert_eq!(cfg.rank_threshold, 0.0001);
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert!(!cfg.foreign_hosts);
        assert!(cfg.output_file.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rank_options_reach_rank_config() {
        let cfg = parse(&["-s", "https://example.com", "--damping-factor", "0.5", "--rank-threshold", "0.01", "--max-steps", "7"]);
        assert_eq!(cfg.rank_config(), RankConfig::new().with_damping_factor(0.5).with_rank_threshold(0.01).with_max_steps(7));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(parse(&["-s", "https://example.com", "--max-urls", "0"]).validate().is_err());
        assert!(parse(&["-s", "https://example.com", "--thread-count", "0"]).validate().is_err());
        assert!(parse(&["-s", "not a url"]).validate().is_err());
        assert!(parse(&["-s", "https://example.com", "--damping-factor", "1.5"]).validate().is_err());
        assert!(parse(&["-s", "https://example.com", "--rank-threshold", "0"]).validate().is_err());
    }

    #[test]
    fn test_missing_start_url_is_a_parse_error() {
        assert!(Config::try_parse_from(["link_ranker"]).is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(parse(&["-s", "https://e.com", "--log-level", "debug"]).log_level, LogLevel::Debug);
    }
}
