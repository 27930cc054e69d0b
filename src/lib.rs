pub mod config;
pub mod crawler;
pub mod error;
pub mod link_graph;
pub mod node;
pub mod report;

pub use error::{RankError, Result};
pub use link_graph::{LinkGraph, NodeRank, PropagationStats, RankConfig};
pub use node::Node;
