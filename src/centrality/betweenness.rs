//! Betweenness centrality (Brandes 2001), for nodes and for edges.
//!
//! One breadth-first search per source yields the shortest-path DAG with path
//! counts σ; walking it backwards accumulates the dependency δ of the source
//! on every node (or edge). Summing over all sources counts every unordered
//! pair twice, which the rescaling accounts for.

use crate::graph::{adjacency, ClubGraph, NodeId, Scores};
use std::collections::{BTreeMap, VecDeque};

/// Shortest-path DAG from one source.
pub(crate) struct ShortestPaths {
    /// Nodes in non-decreasing distance from the source.
    order: Vec<usize>,
    /// Predecessors on shortest paths.
    preds: Vec<Vec<usize>>,
    /// Number of shortest paths from the source.
    sigma: Vec<f64>,
}

impl ShortestPaths {
    pub(crate) fn from_source(adj: &[Vec<usize>], source: usize) -> Self {
        let n = adj.len();
        let mut order = Vec::with_capacity(n);
        let mut preds = vec![Vec::new(); n];
        let mut sigma = vec![0.0; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];

        sigma[source] = 1.0;
        dist[source] = Some(0);
        let mut queue = VecDeque::from([source]);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v].unwrap_or(0);
            for &w in &adj[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        Self {
            order,
            preds,
            sigma,
        }
    }
}

/// Raw (doubled) node betweenness over index-addressed adjacency.
fn node_dependencies(adj: &[Vec<usize>]) -> Vec<f64> {
    let n = adj.len();
    let mut betweenness = vec![0.0; n];
    let mut delta = vec![0.0; n];

    for s in 0..n {
        let sp = ShortestPaths::from_source(adj, s);
        delta.iter_mut().for_each(|d| *d = 0.0);
        for &w in sp.order.iter().rev() {
            let coeff = (1.0 + delta[w]) / sp.sigma[w];
            for &v in &sp.preds[w] {
                delta[v] += sp.sigma[v] * coeff;
            }
            if w != s {
                betweenness[w] += delta[w];
            }
        }
    }
    betweenness
}

/// Raw (doubled) edge betweenness keyed by `(low index, high index)`.
pub(crate) fn edge_dependencies(adj: &[Vec<usize>]) -> BTreeMap<(usize, usize), f64> {
    let n = adj.len();
    let mut betweenness: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (u, neighbors) in adj.iter().enumerate() {
        for &v in neighbors {
            if u < v {
                betweenness.insert((u, v), 0.0);
            }
        }
    }

    let mut delta = vec![0.0; n];
    for s in 0..n {
        let sp = ShortestPaths::from_source(adj, s);
        delta.iter_mut().for_each(|d| *d = 0.0);
        for &w in sp.order.iter().rev() {
            let coeff = (1.0 + delta[w]) / sp.sigma[w];
            for &v in &sp.preds[w] {
                let c = sp.sigma[v] * coeff;
                let key = if v < w { (v, w) } else { (w, v) };
                if let Some(b) = betweenness.get_mut(&key) {
                    *b += c;
                }
                delta[v] += c;
            }
        }
    }
    betweenness
}

/// Node betweenness centrality.
///
/// With `normalized`, scores are divided by `(n-1)(n-2)` (the number of
/// ordered pairs excluding the node) for graphs with more than two nodes;
/// otherwise each unordered pair is counted once.
pub fn betweenness_centrality(graph: &ClubGraph, normalized: bool) -> Scores {
    let adj = adjacency(graph);
    let n = adj.len();
    let raw = node_dependencies(&adj);

    let scale = match (normalized, n) {
        (true, n) if n > 2 => Some(1.0 / ((n - 1) * (n - 2)) as f64),
        (true, _) => None,
        (false, _) => Some(0.5),
    };

    graph
        .node_weights()
        .zip(raw)
        .map(|(m, b)| (m.id, scale.map_or(b, |s| b * s)))
        .collect()
}

/// Edge betweenness centrality, keyed by endpoint ids in node-index order.
///
/// With `normalized`, scores are divided by `n(n-1)`; otherwise each unordered
/// pair is counted once.
pub fn edge_betweenness_centrality(
    graph: &ClubGraph,
    normalized: bool,
) -> BTreeMap<(NodeId, NodeId), f64> {
    let adj = adjacency(graph);
    let n = adj.len();
    let scale = match (normalized, n) {
        (true, n) if n > 1 => Some(1.0 / (n * (n - 1)) as f64),
        (true, _) => None,
        (false, _) => Some(0.5),
    };

    let ids: Vec<NodeId> = graph.node_weights().map(|m| m.id).collect();
    edge_dependencies(&adj)
        .into_iter()
        .map(|((u, v), b)| ((ids[u], ids[v]), scale.map_or(b, |s| b * s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::from_edges;

    #[test]
    fn path_middle_is_highest() {
        // 0 - 1 - 2 - 3
        let g = from_edges(&[(0, 1), (1, 2), (2, 3)]);
        let bc = betweenness_centrality(&g, false);
        assert_eq!(bc[&0], 0.0);
        assert_eq!(bc[&3], 0.0);
        assert!((bc[&1] - 2.0).abs() < 1e-12);
        assert!((bc[&2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn star_center_normalized_is_one() {
        let g = from_edges(&[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let bc = betweenness_centrality(&g, true);
        assert!((bc[&0] - 1.0).abs() < 1e-12);
        assert_eq!(bc[&1], 0.0);
    }

    #[test]
    fn bridge_edge_dominates() {
        // two triangles joined by the 2-3 bridge
        let g = from_edges(&[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)]);
        let eb = edge_betweenness_centrality(&g, false);
        assert_eq!(eb.len(), 7);
        // 3 nodes on each side: 9 pairs cross the bridge
        assert!((eb[&(2, 3)] - 9.0).abs() < 1e-12);
        let (best, _) = eb
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert_eq!(*best, (2, 3));
    }

    #[test]
    fn edge_scores_normalized() {
        let g = from_edges(&[(0, 1)]);
        let eb = edge_betweenness_centrality(&g, true);
        // one pair, both directions counted, divided by n(n-1) = 2
        assert!((eb[&(0, 1)] - 1.0).abs() < 1e-12);
    }
}
