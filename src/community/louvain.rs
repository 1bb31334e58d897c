//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! 1. **Local moving**: start with every node alone; move each node to the
//!    neighbouring community with the largest modularity gain, sweeping
//!    until no node moves.
//! 2. **Aggregation**: collapse each community into one weighted node.
//!    Edges inside a community become a self-loop.
//! 3. Repeat on the collapsed graph while modularity keeps improving.
//!
//! Neighbour communities are visited in ascending id order, so results are
//! deterministic for a given graph.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::modularity::modularity;
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::{ClubGraph, Partition};
use std::collections::BTreeMap;

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Resolution parameter (gamma).
    resolution: f64,
    /// Maximum sweeps per level.
    max_iter: usize,
    /// Maximum levels of aggregation.
    max_levels: usize,
    /// Minimum modularity improvement to continue.
    min_modularity_gain: f64,
}

impl Louvain {
    /// Create a new Louvain detector with default settings.
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            max_iter: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
        }
    }

    /// Set resolution parameter.
    ///
    /// Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set maximum sweeps per level.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set maximum aggregation levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels;
        self
    }

    /// Community label per node index, numbered by first appearance.
    fn labels(&self, graph: &ClubGraph) -> Result<Vec<usize>> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if graph.edge_count() == 0 {
            return Ok((0..n).collect());
        }

        let mut level = Level::from_graph(graph);
        // assignment[original node] = node at the current level
        let mut assignment: Vec<usize> = (0..n).collect();
        let mut prev_modularity = f64::NEG_INFINITY;

        for depth in 0..self.max_levels {
            let (communities, moved) = level.local_moving(self.resolution, self.max_iter);
            if !moved {
                break;
            }

            let q = level.modularity(&communities, self.resolution);
            if q - prev_modularity < self.min_modularity_gain {
                break;
            }
            prev_modularity = q;

            let (next, membership) = level.aggregate(&communities);
            log::debug!("louvain level {depth}: {} -> {} nodes, Q = {q:.4}", level.n, next.n);
            for a in &mut assignment {
                *a = membership[*a];
            }
            if next.n == level.n {
                break;
            }
            level = next;
        }

        Ok(renumber(&assignment))
    }
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for Louvain {
    fn detect(&self, graph: &ClubGraph) -> Result<Partition> {
        let labels = self.labels(graph)?;
        Ok(graph
            .node_weights()
            .zip(labels)
            .map(|(m, c)| (m.id, c))
            .collect())
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }
}

/// Louvain partition of `graph` together with its modularity.
pub fn louvain_communities(graph: &ClubGraph) -> Result<(Partition, f64)> {
    let partition = Louvain::new().detect(graph)?;
    let q = modularity(graph, &partition)?;
    Ok((partition, q))
}

/// Relabel so ids are `0..k` in order of first appearance.
fn renumber(labels: &[usize]) -> Vec<usize> {
    let mut seen: BTreeMap<usize, usize> = BTreeMap::new();
    labels
        .iter()
        .map(|&l| {
            let next = seen.len();
            *seen.entry(l).or_insert(next)
        })
        .collect()
}

/// Weighted graph at one aggregation level.
#[derive(Debug, Clone)]
struct Level {
    n: usize,
    /// Undirected edges `(i, j, w)` with `i < j`.
    edges: Vec<(usize, usize, f64)>,
    /// Internal weight collapsed into each node.
    self_loops: Vec<f64>,
}

impl Level {
    fn from_graph(graph: &ClubGraph) -> Self {
        let n = graph.node_count();
        let mut self_loops = vec![0.0; n];
        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge in graph.raw_edges() {
            let (i, j) = (edge.source().index(), edge.target().index());
            match i.cmp(&j) {
                std::cmp::Ordering::Less => edges.push((i, j, 1.0)),
                std::cmp::Ordering::Greater => edges.push((j, i, 1.0)),
                std::cmp::Ordering::Equal => self_loops[i] += 1.0,
            }
        }
        Self {
            n,
            edges,
            self_loops,
        }
    }

    fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.2).sum::<f64>() + self.self_loops.iter().sum::<f64>()
    }

    /// Weighted degrees; self-loops count twice.
    fn degrees(&self) -> Vec<f64> {
        let mut degrees: Vec<f64> = self.self_loops.iter().map(|sl| 2.0 * sl).collect();
        for &(i, j, w) in &self.edges {
            degrees[i] += w;
            degrees[j] += w;
        }
        degrees
    }

    /// `Σ_c [ in_c / m − γ (tot_c / 2m)² ]`
    fn modularity(&self, communities: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight();
        if m == 0.0 {
            return 0.0;
        }
        let mut internal: BTreeMap<usize, f64> = BTreeMap::new();
        let mut totals: BTreeMap<usize, f64> = BTreeMap::new();

        for (node, deg) in self.degrees().into_iter().enumerate() {
            *totals.entry(communities[node]).or_insert(0.0) += deg;
            *internal.entry(communities[node]).or_insert(0.0) += self.self_loops[node];
        }
        for &(i, j, w) in &self.edges {
            if communities[i] == communities[j] {
                *internal.entry(communities[i]).or_insert(0.0) += w;
            }
        }

        totals
            .iter()
            .map(|(c, tot)| {
                let inside = internal.get(c).copied().unwrap_or(0.0);
                inside / m - resolution * (tot / (2.0 * m)).powi(2)
            })
            .sum()
    }

    /// Greedy node moves. Returns (community per node, whether anything moved).
    fn local_moving(&self, resolution: f64, max_iter: usize) -> (Vec<usize>, bool) {
        let m = self.total_weight();
        if m == 0.0 {
            return ((0..self.n).collect(), false);
        }

        let mut adj: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); self.n];
        for &(i, j, w) in &self.edges {
            *adj[i].entry(j).or_insert(0.0) += w;
            *adj[j].entry(i).or_insert(0.0) += w;
        }

        let degrees = self.degrees();
        let mut communities: Vec<usize> = (0..self.n).collect();
        let mut community_degrees = degrees.clone();
        let mut any_moved = false;

        for _sweep in 0..max_iter {
            let mut moved = false;

            for node in 0..self.n {
                let current = communities[node];
                let ki = degrees[node];
                community_degrees[current] -= ki;

                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                for (&neighbor, &w) in &adj[node] {
                    *links.entry(communities[neighbor]).or_insert(0.0) += w;
                }

                let mut best = current;
                let mut best_gain = 0.0;
                for (&target, &ki_in) in &links {
                    let gain =
                        ki_in / m - resolution * community_degrees[target] * ki / (2.0 * m * m);
                    if gain > best_gain {
                        best_gain = gain;
                        best = target;
                    }
                }

                community_degrees[best] += ki;
                if best != current {
                    communities[node] = best;
                    moved = true;
                    any_moved = true;
                }
            }

            if !moved {
                break;
            }
        }

        (communities, any_moved)
    }

    /// Collapse communities into nodes. Returns the new level and the
    /// membership map `old node -> new node`.
    fn aggregate(&self, communities: &[usize]) -> (Level, Vec<usize>) {
        let membership = renumber(communities);
        let n_new = membership.iter().copied().max().map_or(0, |c| c + 1);

        let mut self_loops = vec![0.0; n_new];
        for (node, &sl) in self.self_loops.iter().enumerate() {
            self_loops[membership[node]] += sl;
        }

        let mut weights: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(i, j, w) in &self.edges {
            let (ci, cj) = (membership[i], membership[j]);
            if ci == cj {
                self_loops[ci] += w;
            } else {
                *weights.entry((ci.min(cj), ci.max(cj))).or_insert(0.0) += w;
            }
        }

        let level = Level {
            n: n_new,
            edges: weights.into_iter().map(|((i, j), w)| (i, j, w)).collect(),
            self_loops,
        };
        (level, membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{from_edges, GraphBuilder};

    #[test]
    fn test_louvain_triangle() {
        let g = from_edges(&[(0, 1), (1, 2), (0, 2)]);
        let p = Louvain::new().detect(&g).unwrap();

        assert_eq!(p.len(), 3);
        assert_eq!(p[&0], p[&1]);
        assert_eq!(p[&1], p[&2]);
    }

    #[test]
    fn test_louvain_two_cliques() {
        let g = from_edges(&[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)]);
        let p = Louvain::new().detect(&g).unwrap();

        assert_eq!(p[&0], p[&1]);
        assert_eq!(p[&1], p[&2]);
        assert_eq!(p[&3], p[&4]);
        assert_eq!(p[&4], p[&5]);
        assert_ne!(p[&0], p[&3]);
        // numbered by first appearance
        assert_eq!(p[&0], 0);
    }

    #[test]
    fn test_louvain_empty_graph() {
        let g = GraphBuilder::new().build();
        assert!(matches!(Louvain::new().detect(&g), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_louvain_isolated_nodes() {
        let mut b = GraphBuilder::new();
        b.add_node(0);
        b.add_node(1);
        let p = Louvain::new().detect(&b.build()).unwrap();
        assert_ne!(p[&0], p[&1]);
    }

    #[test]
    fn test_louvain_deterministic() {
        let g = from_edges(&[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3), (5, 6)]);
        let a = Louvain::new().detect(&g).unwrap();
        let b = Louvain::new().detect(&g).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_level_modularity_matches_graph_modularity() {
        let g = from_edges(&[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)]);
        let level = Level::from_graph(&g);
        let labels = vec![0, 0, 0, 1, 1, 1];
        let partition: Partition = (0..6).zip(labels.iter().copied()).collect();
        let expected = modularity(&g, &partition).unwrap();
        assert!((level.modularity(&labels, 1.0) - expected).abs() < 1e-12);
    }
}
