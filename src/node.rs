use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// One identified resource (usually a URL) in the link graph.
///
/// Identity is the identifier alone: rank, timestamp and edges are ignored
/// by `Eq`, `Hash` and `Ord`.
#[derive(Debug, Clone)]
pub struct Node {
    identifier: String,
    rank: f64,
    timestamp: SystemTime,
    children: Vec<String>, // outgoing edges
    parents: Vec<String>,  // incoming edges
}

impl Node {
    pub fn new(identifier: impl Into<String>, timestamp: SystemTime) -> Self {
        Self {
            identifier: identifier.into(),
            rank: 0.0,
            timestamp,
            children: vec![],
            parents: vec![],
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Number of outgoing edges
    pub fn out_degree(&self) -> usize {
        self.children.len()
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.iter().any(|c| c == id)
    }

    pub fn has_parent(&self, id: &str) -> bool {
        self.parents.iter().any(|p| p == id)
    }

    /// Returns `false` if `id` was already a child
    pub fn add_child(&mut self, id: &str) -> bool {
        if self.has_child(id) {
            return false;
        }
        self.children.push(id.to_string());
        true
    }

    /// Returns `false` if `id` was already a parent
    pub fn add_parent(&mut self, id: &str) -> bool {
        if self.has_parent(id) {
            return false;
        }
        self.parents.push(id.to_string());
        true
    }

    pub fn update_rank(&mut self, rank: f64) {
        self.rank = rank;
    }

    pub fn update_timestamp(&mut self, timestamp: SystemTime) {
        self.timestamp = timestamp;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(&other.identifier)
    }
}
