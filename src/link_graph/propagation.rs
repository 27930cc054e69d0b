//! Incremental rank propagation.
//!
//! Starting from one node, recompute its rank from its parents, then walk
//! outwards breadth-first. A node whose rank moved by less than the
//! configured relative threshold is converged and stops the walk along its
//! outgoing edges; anything else enqueues all of its children. There is no
//! visited set, so a node reached along several paths is recomputed on every
//! visit against the parent ranks current at that moment.

use std::collections::VecDeque;

use log2::{debug, trace};

use super::LinkGraph;
use crate::error::{RankError, Result};

/// Counters describing a single `update_rank` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Nodes dequeued and recomputed, revisits included
    pub processed: usize,
    /// Recomputations whose relative change fell under the threshold
    pub converged: usize,
    /// Child identifiers pushed onto the work queue
    pub enqueued: usize,
}

impl LinkGraph {
    /// Recomputes the rank of `start` and propagates the change to its descendants.
    ///
    /// Ranks written before a [`RankError::StepLimitExceeded`] are kept.
    pub fn update_rank(&mut self, start: &str) -> Result<PropagationStats> {
        if !self.has_link(start) {
            return Err(RankError::NotFound(start.to_string()));
        }

        let mut work_queue: VecDeque<String> = VecDeque::new();
        work_queue.push_back(start.to_string());
        let mut stats = PropagationStats::default();

        while let Some(current) = work_queue.pop_front() {
            if stats.processed >= self.config.max_steps {
                return Err(RankError::StepLimitExceeded {
                    start: start.to_string(),
                    steps: stats.processed,
                });
            }
            stats.processed += 1;

            let new_rank = self.compute_rank(&current)?;
            let node = self.get_node_mut(&current)?;
            let old_rank = node.rank();
            node.update_rank(new_rank);

            let change = relative_change(old_rank, new_rank);
            trace!("{}: rank {} -> {} (relative change {})", current, old_rank, new_rank, change);

            if change < self.config.rank_threshold {
                stats.converged += 1;
                continue;
            }

            let children = self.get_node(&current)?.children();
            stats.enqueued += children.len();
            work_queue.extend(children.iter().cloned());
        }

        debug!(
            "Rank update from {} done: {} processed, {} converged, {} enqueued",
            start, stats.processed, stats.converged, stats.enqueued
        );
        Ok(stats)
    }

    /// `(1 - d) + d * sum(rank(p) / out_degree(p))` over the parents of `id`
    fn compute_rank(&self, id: &str) -> Result<f64> {
        let node = self.get_node(id)?;
        let mut incoming = 0.0;
        for parent_id in node.parents() {
            let parent = self.get_node(parent_id)?;
            // a parent always lists this node as a child, zero only if edges were corrupted
            if parent.out_degree() > 0 {
                incoming += parent.rank() / parent.out_degree() as f64;
            }
        }
        let d = self.config.damping_factor;
        Ok((1.0 - d) + d * incoming)
    }
}

/// `|new - old| / old`. A node that never had a rank counts as fully changed.
fn relative_change(old_rank: f64, new_rank: f64) -> f64 {
    if old_rank == 0.0 {
        if new_rank == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (new_rank - old_rank).abs() / old_rank
    }
}
