//! Girvan-Newman divisive hierarchy as a pull-based iterator.
//!
//! Each call to [`Iterator::next`] removes the edge with the highest edge
//! betweenness (recomputed after every removal) until the number of
//! connected components grows, then yields the new components. Successive
//! groupings therefore have strictly more groups than their predecessors.
//!
//! The iterator owns an adjacency copy of the input graph; the caller's graph
//! is never touched. [`GirvanNewman::restart`] rewinds to the original edge
//! set.
//!
//! # References
//!
//! Girvan & Newman (2002). "Community structure in social and biological
//! networks." PNAS 99(12), 7821–7826.

use crate::centrality::edge_dependencies;
use crate::graph::{adjacency, ClubGraph, NodeId};
use std::collections::VecDeque;

/// Disjoint node groups covering every node.
///
/// Groups are ordered by the lowest node index they contain, and members are
/// listed in node-index order.
pub type Grouping = Vec<Vec<NodeId>>;

/// Progress of a [`GirvanNewman`] sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Nothing yielded yet.
    Fresh,
    /// At least one grouping yielded and edges remain.
    Producing,
    /// No further groupings.
    Exhausted,
}

/// Lazy sequence of ever finer groupings.
#[derive(Debug, Clone)]
pub struct GirvanNewman {
    ids: Vec<NodeId>,
    pristine: Vec<Vec<usize>>,
    working: Vec<Vec<usize>>,
    edge_count: usize,
    state: SequenceState,
}

impl GirvanNewman {
    /// Start a sequence over a snapshot of `graph`.
    pub fn new(graph: &ClubGraph) -> Self {
        let pristine = adjacency(graph);
        let edge_count = pristine.iter().map(Vec::len).sum::<usize>() / 2;
        Self {
            ids: graph.node_weights().map(|m| m.id).collect(),
            working: pristine.clone(),
            pristine,
            edge_count,
            state: SequenceState::Fresh,
        }
    }

    /// Rewind to the first grouping.
    pub fn restart(&mut self) {
        self.working = self.pristine.clone();
        self.edge_count = self.working.iter().map(Vec::len).sum::<usize>() / 2;
        self.state = SequenceState::Fresh;
    }

    /// Current state.
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Edges not yet removed.
    pub fn remaining_edges(&self) -> usize {
        self.edge_count
    }

    /// Connected components of the input, before any edge is removed.
    ///
    /// Not part of the sequence itself: the first yielded grouping always
    /// has more groups than this one (unless the input is edgeless).
    pub fn initial_grouping(&self) -> Grouping {
        let mut unsplit = self.clone();
        unsplit.restart();
        unsplit.to_grouping(unsplit.components())
    }

    /// Connected components of the working copy, by node index.
    fn components(&self) -> Vec<Vec<usize>> {
        let n = self.working.len();
        let mut seen = vec![false; n];
        let mut out = Vec::new();
        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut members = Vec::new();
            let mut queue = VecDeque::from([start]);
            while let Some(v) = queue.pop_front() {
                members.push(v);
                for &w in &self.working[v] {
                    if !seen[w] {
                        seen[w] = true;
                        queue.push_back(w);
                    }
                }
            }
            members.sort_unstable();
            out.push(members);
        }
        out
    }

    /// Remove the edge with the highest betweenness; ties go to the smallest
    /// `(low, high)` index pair.
    fn remove_most_central_edge(&mut self) {
        let mut best: Option<((usize, usize), f64)> = None;
        for (edge, score) in edge_dependencies(&self.working) {
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((edge, score));
            }
        }
        if let Some(((u, v), score)) = best {
            log::trace!("removing edge ({}, {}) betweenness {score}", self.ids[u], self.ids[v]);
            self.working[u].retain(|&w| w != v);
            self.working[v].retain(|&w| w != u);
            self.edge_count -= 1;
        }
    }

    fn to_grouping(&self, components: Vec<Vec<usize>>) -> Grouping {
        components
            .into_iter()
            .map(|c| c.into_iter().map(|i| self.ids[i]).collect())
            .collect()
    }
}

impl Iterator for GirvanNewman {
    type Item = Grouping;

    fn next(&mut self) -> Option<Grouping> {
        if self.state == SequenceState::Exhausted {
            return None;
        }

        if self.edge_count == 0 {
            // An edgeless input still yields its components once.
            let first = self.state == SequenceState::Fresh;
            self.state = SequenceState::Exhausted;
            return first.then(|| self.to_grouping(self.components()));
        }

        self.state = SequenceState::Producing;
        let before = self.components().len();
        loop {
            self.remove_most_central_edge();
            let components = self.components();
            if components.len() > before || self.edge_count == 0 {
                return Some(self.to_grouping(components));
            }
        }
    }
}
