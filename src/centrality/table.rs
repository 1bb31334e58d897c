//! Tabular view of all centrality measures.

use super::{betweenness_centrality, closeness_centrality, degree_centrality};
use crate::graph::{ClubGraph, NodeId, Scores};
use serde::Serialize;

/// Centralities of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CentralityRow {
    /// Node id.
    pub node: NodeId,
    /// Degree centrality.
    pub degree: f64,
    /// Normalized betweenness centrality.
    pub betweenness: f64,
    /// Closeness centrality.
    pub closeness: f64,
}

/// One row per node, sorted by node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CentralityTable {
    rows: Vec<CentralityRow>,
}

impl CentralityTable {
    /// Rows in node order.
    pub fn rows(&self) -> &[CentralityRow] {
        &self.rows
    }

    /// Node ids in row order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.rows.iter().map(|r| r.node).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the graph had no nodes.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for one node.
    pub fn get(&self, node: NodeId) -> Option<&CentralityRow> {
        self.rows
            .binary_search_by_key(&node, |r| r.node)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Single column as a score map.
    pub fn column(&self, select: impl Fn(&CentralityRow) -> f64) -> Scores {
        self.rows.iter().map(|r| (r.node, select(r))).collect()
    }
}

/// Degree, normalized betweenness and closeness for every node.
pub fn compute_all_centralities(graph: &ClubGraph) -> CentralityTable {
    let degree = degree_centrality(graph);
    let betweenness = betweenness_centrality(graph, true);
    let closeness = closeness_centrality(graph);

    // Score maps iterate in node-id order already.
    let rows = degree
        .iter()
        .map(|(&node, &d)| CentralityRow {
            node,
            degree: d,
            betweenness: betweenness.get(&node).copied().unwrap_or(0.0),
            closeness: closeness.get(&node).copied().unwrap_or(0.0),
        })
        .collect();

    CentralityTable { rows }
}

/// The `n` highest-scoring nodes, best first. Ties keep node-id order.
pub fn top_central_nodes(scores: &Scores, n: usize) -> Vec<(NodeId, f64)> {
    let mut ranked: Vec<(NodeId, f64)> = scores.iter().map(|(&k, &v)| (k, v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::from_edges;

    #[test]
    fn table_sorted_by_node() {
        let g = from_edges(&[(5, 1), (1, 3)]);
        let table = compute_all_centralities(&g);
        assert_eq!(table.nodes(), vec![1, 3, 5]);
        assert_eq!(table.get(1).map(|r| r.degree), Some(1.0));
        assert!(table.get(2).is_none());
    }

    #[test]
    fn top_nodes_stable_on_ties() {
        let scores: Scores = [(0, 0.5), (1, 0.9), (2, 0.5), (3, 0.1)].into_iter().collect();
        let top = top_central_nodes(&scores, 3);
        assert_eq!(top, vec![(1, 0.9), (0, 0.5), (2, 0.5)]);
        assert_eq!(top_central_nodes(&scores, 10).len(), 4);
    }
}
