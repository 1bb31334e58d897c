//! Merge history of agglomerative clustering.
//!
//! Leaves are `0..n`; merge `i` creates cluster `n + i` (SciPy/MATLAB
//! labelling, as produced by `kodama`).

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A single merge operation in the dendrogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// First cluster being merged.
    pub cluster_a: usize,
    /// Second cluster being merged.
    pub cluster_b: usize,
    /// Dissimilarity at which the merge occurred.
    pub distance: f64,
    /// Size of the resulting cluster.
    pub size: usize,
}

/// A dendrogram recording hierarchical cluster merges.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    merges: Vec<Merge>,
    n_items: usize,
}

impl Dendrogram {
    /// Create an empty dendrogram over `n_items` leaves.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
        }
    }

    /// Record a merge operation.
    pub fn add_merge(&mut self, cluster_a: usize, cluster_b: usize, distance: f64, size: usize) {
        self.merges.push(Merge {
            cluster_a,
            cluster_b,
            distance,
            size,
        });
    }

    /// Labels for `k` clusters: replay the first `n - k` merges.
    ///
    /// Labels are numbered by first appearance in item order.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        if k == 0 || k > self.n_items {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: self.n_items,
            });
        }

        let mut parent: Vec<usize> = (0..self.n_items + self.merges.len()).collect();
        for (i, merge) in self.merges.iter().take(self.n_items - k).enumerate() {
            let merged = self.n_items + i;
            parent[merge.cluster_a] = merged;
            parent[merge.cluster_b] = merged;
        }

        let mut seen: BTreeMap<usize, usize> = BTreeMap::new();
        Ok((0..self.n_items)
            .map(|item| {
                // merged ids only grow, so the walk terminates
                let mut root = item;
                while parent[root] != root {
                    root = parent[root];
                }
                let next = seen.len();
                *seen.entry(root).or_insert(next)
            })
            .collect())
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Iterate over merges.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// Merge distances in merge order.
    pub fn distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_leaves() -> Dendrogram {
        let mut dendro = Dendrogram::new(4);
        dendro.add_merge(0, 1, 0.5, 2);
        dendro.add_merge(2, 3, 0.7, 2);
        dendro.add_merge(4, 5, 1.0, 4);
        dendro
    }

    #[test]
    fn test_dendrogram_creation() {
        let dendro = Dendrogram::new(5);
        assert_eq!(dendro.n_items(), 5);
        assert_eq!(dendro.n_merges(), 0);
    }

    #[test]
    fn test_cut_replays_merges() {
        let dendro = four_leaves();
        assert_eq!(dendro.cut_to_k(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(dendro.cut_to_k(3).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(dendro.cut_to_k(2).unwrap(), vec![0, 0, 1, 1]);
        assert_eq!(dendro.cut_to_k(1).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(dendro.distances(), vec![0.5, 0.7, 1.0]);
    }

    #[test]
    fn test_cut_rejects_bad_k() {
        let dendro = four_leaves();
        assert!(dendro.cut_to_k(0).is_err());
        assert!(dendro.cut_to_k(5).is_err());
    }
}
