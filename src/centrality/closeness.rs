//! Closeness centrality with the Wasserman–Faust correction.
//!
//! For node `u` reaching `r` nodes (itself included) at total distance `Σd`:
//!
//! ```text
//! C(u) = ((r - 1) / Σd) × ((r - 1) / (n - 1))
//! ```
//!
//! The second factor scales scores down for nodes in small components, so
//! values stay comparable on disconnected graphs.

use crate::graph::{adjacency, ClubGraph, Scores};
use std::collections::VecDeque;

/// Closeness centrality of every node.
pub fn closeness_centrality(graph: &ClubGraph) -> Scores {
    let adj = adjacency(graph);
    let n = adj.len();

    graph
        .node_indices()
        .map(|u| {
            let (reached, total) = bfs_distance_sum(&adj, u.index());
            let score = if total > 0 && n > 1 {
                let r = (reached - 1) as f64;
                (r / total as f64) * (r / (n - 1) as f64)
            } else {
                0.0
            };
            (graph[u].id, score)
        })
        .collect()
}

/// Number of reachable nodes (including the source) and the sum of their distances.
fn bfs_distance_sum(adj: &[Vec<usize>], source: usize) -> (usize, usize) {
    let mut dist: Vec<Option<usize>> = vec![None; adj.len()];
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    let (mut reached, mut total) = (0, 0);

    while let Some(v) = queue.pop_front() {
        let dv = dist[v].unwrap_or(0);
        reached += 1;
        total += dv;
        for &w in &adj[v] {
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
        }
    }
    (reached, total)
}
