mod config;
mod propagation;


use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;

use log2::debug;

use crate::error::{RankError, Result};
use crate::node::Node;

pub use config::{RankConfig, DEFAULT_DAMPING_FACTOR, DEFAULT_MAX_STEPS, DEFAULT_RANK_THRESHOLD};
pub use propagation::PropagationStats;

/// Upper end of the normalized rank scale
pub const NORMALIZED_RANK_MAX: f64 = 10.0;

/// Raw and 0-10 normalized rank of a single link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRank {
    pub raw: f64,
    pub normalized: f64,
}

/// Directed graph of links, owning every node keyed by its identifier.
///
/// Every identifier stored in a node's children or parents is itself a key
/// of `links`: edges are only created through [`LinkGraph::add_connection`],
/// which adds both endpoints first.
#[derive(Debug)]
pub struct LinkGraph {
    links: HashMap<String, Node>,
    config: RankConfig,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self {
            links: HashMap::new(),
            config: RankConfig::default(),
        }
    }

    pub fn with_config(config: RankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            links: HashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All nodes, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.links.values()
    }

    pub fn has_link(&self, id: &str) -> bool {
        self.links.contains_key(id)
    }

    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.links
            .get(id)
            .ok_or_else(|| RankError::NotFound(id.to_string()))
    }

    fn get_node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.links
            .get_mut(id)
            .ok_or_else(|| RankError::NotFound(id.to_string()))
    }

    /// Creates the node if absent. Returns `false` when it already existed.
    pub fn add_link(&mut self, id: &str) -> bool {
        if self.has_link(id) {
            return false;
        }
        self.links
            .insert(id.to_string(), Node::new(id, SystemTime::now()));
        true
    }

    /// Adds the edge `from -> to`, creating missing endpoints.
    ///
    /// Returns `false` only if the edge was already recorded on both sides.
    pub fn add_connection(&mut self, from: &str, to: &str) -> bool {
        self.add_link(from);
        self.add_link(to);

        let added_child = self
            .links
            .get_mut(from)
            .is_some_and(|node| node.add_child(to));
        let added_parent = self
            .links
            .get_mut(to)
            .is_some_and(|node| node.add_parent(from));

        if added_child || added_parent {
            debug!("Connected {} -> {}", from, to);
        }
        added_child || added_parent
    }

    pub fn get_incoming_links(&self, id: &str) -> Result<&[String]> {
        Ok(self.get_node(id)?.parents())
    }

    pub fn get_outgoing_links(&self, id: &str) -> Result<&[String]> {
        Ok(self.get_node(id)?.children())
    }

    pub fn update_timestamp(&mut self, id: &str, timestamp: SystemTime) -> Result<()> {
        self.get_node_mut(id)?.update_timestamp(timestamp);
        Ok(())
    }

    /// Raw rank and rank scaled so the highest raw rank maps to 10.
    ///
    /// If every raw rank is 0 (or the graph is empty) all normalized ranks are 0.
    pub fn get_all_ranks(&self) -> BTreeMap<String, NodeRank> {
        let rank_max = self
            .links
            .values()
            .map(Node::rank)
            .fold(0.0_f64, f64::max);

        self.links
            .values()
            .map(|node| {
                let raw = node.rank();
                let normalized = if rank_max > 0.0 {
                    raw / rank_max * NORMALIZED_RANK_MAX
                } else {
                    0.0
                };
                (node.identifier().to_string(), NodeRank { raw, normalized })
            })
            .collect()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}
