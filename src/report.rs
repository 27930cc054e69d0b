use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::link_graph::NodeRank;

/// One row of the rank report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub url: String,
    pub raw_rank: f64,
    pub normalized_rank: f64,
}

/// Ranks ordered best first; equal raw ranks are ordered by URL
pub fn sorted_ranks(ranks: &BTreeMap<String, NodeRank>) -> Vec<RankEntry> {
    let mut entries: Vec<RankEntry> = ranks
        .iter()
        .map(|(url, rank)| RankEntry {
            url: url.clone(),
            raw_rank: rank.raw,
            normalized_rank: rank.normalized,
        })
        .collect();
    // BTreeMap iteration already orders by url, so a stable sort keeps ties in url order
    entries.sort_by(|a, b| b.raw_rank.total_cmp(&a.raw_rank));
    entries
}

/// Print the `top` best ranked pages in a readable format
pub fn print_ranks(entries: &[RankEntry], top: usize) {
    println!("Top {} of {} ranked pages:", top.min(entries.len()), entries.len());
    for (i, entry) in entries.iter().take(top).enumerate() {
        println!(
            "  {:>3}. {:>6.2}  ({:.6})  {}",
            i + 1,
            entry.normalized_rank,
            entry.raw_rank,
            entry.url
        );
    }
}

/// Write every entry to `path` as a pretty-printed JSON array
pub fn write_ranks_json(path: &Path, entries: &[RankEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json).with_context(|| format!("failed to write ranks to {:?}", path))?;
    Ok(())
}
