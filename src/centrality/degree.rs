//! Degree centrality.

use crate::graph::{ClubGraph, Scores};

/// Fraction of the other nodes each node is adjacent to.
///
/// Graphs with at most one node score every node `1.0`.
pub fn degree_centrality(graph: &ClubGraph) -> Scores {
    let n = graph.node_count();
    if n <= 1 {
        return graph.node_weights().map(|m| (m.id, 1.0)).collect();
    }
    let scale = 1.0 / (n - 1) as f64;
    graph
        .node_indices()
        .map(|i| (graph[i].id, graph.neighbors(i).count() as f64 * scale))
        .collect()
}
