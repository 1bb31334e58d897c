//! Community detection traits.

use crate::error::Result;
use crate::graph::{ClubGraph, Partition};

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node id to community id covering every node.
    fn detect(&self, graph: &ClubGraph) -> Result<Partition>;

    /// Get the resolution parameter (if applicable).
    fn resolution(&self) -> f64 {
        1.0
    }
}
