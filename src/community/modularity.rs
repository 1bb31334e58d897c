//! Newman modularity of a partition and partition helpers.

use crate::error::{Error, Result};
use crate::graph::{ClubGraph, NodeId, Partition};
use std::collections::BTreeMap;

/// Modularity of `partition` on `graph`:
///
/// ```text
/// Q = Σ_c [ L_c / m − (d_c / 2m)² ]
/// ```
///
/// where `L_c` counts edges inside community `c`, `d_c` sums the degrees of
/// its nodes and `m` is the edge count.
///
/// # Errors
///
/// [`Error::UndefinedModularity`] for a graph without edges and
/// [`Error::UnknownNode`] when `partition` misses a node.
pub fn modularity(graph: &ClubGraph, partition: &Partition) -> Result<f64> {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return Err(Error::UndefinedModularity);
    }

    let community = |i: petgraph::graph::NodeIndex| {
        let id = graph[i].id;
        partition.get(&id).copied().ok_or(Error::UnknownNode(id))
    };

    let mut internal: BTreeMap<usize, f64> = BTreeMap::new();
    let mut degree: BTreeMap<usize, f64> = BTreeMap::new();
    for i in graph.node_indices() {
        degree.entry(community(i)?).or_insert(0.0);
    }
    for edge in graph.raw_edges() {
        let (ca, cb) = (community(edge.source())?, community(edge.target())?);
        *degree.entry(ca).or_insert(0.0) += 1.0;
        *degree.entry(cb).or_insert(0.0) += 1.0;
        if ca == cb {
            *internal.entry(ca).or_insert(0.0) += 1.0;
        }
    }

    Ok(degree
        .iter()
        .map(|(c, d)| internal.get(c).copied().unwrap_or(0.0) / m - (d / (2.0 * m)).powi(2))
        .sum())
}

/// Nodes assigned to `community`, in id order.
pub fn community_members(partition: &Partition, community: usize) -> Vec<NodeId> {
    partition
        .iter()
        .filter(|&(_, &c)| c == community)
        .map(|(&node, _)| node)
        .collect()
}

/// Number of distinct communities used by `partition`.
pub fn community_count(partition: &Partition) -> usize {
    let mut ids: Vec<usize> = partition.values().copied().collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}
