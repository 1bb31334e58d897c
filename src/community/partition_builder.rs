//! Girvan-Newman communities with a requested community count.
//!
//! The divisive hierarchy rarely lines up with an arbitrary target, so the
//! builder picks a level and then reconciles it into a total partition:
//!
//! 1. If the input already falls apart into exactly `num_communities`
//!    connected components, use those.
//! 2. Otherwise pull groupings from [`GirvanNewman`] until one has at least
//!    `num_communities` groups. An exact match is the normal case, since each
//!    level adds exactly one group to a connected input.
//! 3. If the sequence runs dry first, restart it and take its first grouping,
//!    even though that has fewer groups than requested.
//! 4. Number the first `num_communities` groups `0, 1, …` in order.
//! 5. Every node left over is lumped into community `num_communities - 1`.
//!
//! Steps 3 and 5 lose information on purpose: callers always get a partition
//! covering every node, but not necessarily one with `num_communities`
//! distinct, faithful groups.

use super::girvan_newman::{GirvanNewman, Grouping};
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::{ClubGraph, Partition};

/// Builds a flat partition with a target community count from the
/// Girvan-Newman hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionBuilder {
    num_communities: usize,
}

impl PartitionBuilder {
    /// Builder targeting `num_communities` groups.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `num_communities` is zero.
    pub fn new(num_communities: usize) -> Result<Self> {
        if num_communities == 0 {
            return Err(Error::InvalidArgument {
                name: "num_communities",
                message: "must be >= 1",
            });
        }
        Ok(Self { num_communities })
    }

    /// Target community count.
    pub fn num_communities(&self) -> usize {
        self.num_communities
    }

    /// Pick the grouping to flatten, consuming `sequence` as needed.
    pub fn select_grouping(&self, sequence: &mut GirvanNewman) -> Grouping {
        let target = self.num_communities;
        let initial = sequence.initial_grouping();
        if initial.len() == target {
            log::debug!("girvan-newman: input already has {target} components");
            return initial;
        }

        for grouping in sequence.by_ref() {
            if grouping.len() == target {
                log::debug!("girvan-newman: exact match with {target} groups");
                return grouping;
            }
            if grouping.len() > target {
                log::debug!(
                    "girvan-newman: overshoot, {} groups for target {target}",
                    grouping.len()
                );
                return grouping;
            }
        }

        log::debug!("girvan-newman: no level reached {target} groups, using first level");
        sequence.restart();
        sequence.next().unwrap_or_default()
    }

    /// Flatten `grouping` into a partition covering every node of `graph`.
    pub fn assemble(&self, graph: &ClubGraph, grouping: &Grouping) -> Partition {
        let mut partition = Partition::new();
        for (community, members) in grouping.iter().take(self.num_communities).enumerate() {
            for &node in members {
                partition.insert(node, community);
            }
        }

        let last = self.num_communities - 1;
        for member in graph.node_weights() {
            partition.entry(member.id).or_insert(last);
        }
        partition
    }

    /// Run the whole procedure on `graph`.
    pub fn build(&self, graph: &ClubGraph) -> Partition {
        let mut sequence = GirvanNewman::new(graph);
        let grouping = self.select_grouping(&mut sequence);
        self.assemble(graph, &grouping)
    }
}

impl CommunityDetection for PartitionBuilder {
    fn detect(&self, graph: &ClubGraph) -> Result<Partition> {
        Ok(self.build(graph))
    }
}

/// Girvan-Newman communities for a requested community count.
///
/// Always returns a partition covering every node. When the hierarchy has
/// no level with at least `num_communities` groups, the first level is used
/// instead, and nodes outside the first `num_communities` groups are placed
/// in community `num_communities - 1`. Both behaviors are deliberate and
/// lossy; see [`PartitionBuilder`].
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `num_communities` is zero.
pub fn detect_communities_by_count(graph: &ClubGraph, num_communities: usize) -> Result<Partition> {
    Ok(PartitionBuilder::new(num_communities)?.build(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{from_edges, GraphBuilder};

    #[test]
    fn zero_communities_is_invalid() {
        let g = from_edges(&[(0, 1)]);
        assert!(matches!(
            detect_communities_by_count(&g, 0),
            Err(Error::InvalidArgument { name: "num_communities", .. })
        ));
    }

    #[test]
    fn overshoot_lumps_trailing_groups() {
        // three components from the start, two requested
        let g = from_edges(&[(0, 1), (2, 3), (4, 5)]);
        let p = detect_communities_by_count(&g, 2).unwrap();

        // first level splits one pair: {0},{1},{2,3},{4,5}
        assert_eq!(p[&0], 0);
        assert_eq!(p[&1], 1);
        assert_eq!(p[&2], 1);
        assert_eq!(p[&5], 1);
    }

    #[test]
    fn overshoot_stops_at_first_finer_level() {
        // path 0-1-2-3 plus two pairs: the first level cuts (1, 2), giving
        // {0,1},{2,3},{4,5},{6,7}; later levels are never consulted
        let g = from_edges(&[(0, 1), (1, 2), (2, 3), (4, 5), (6, 7)]);
        let builder = PartitionBuilder::new(2).unwrap();
        let mut seq = GirvanNewman::new(&g);
        let grouping = builder.select_grouping(&mut seq);
        assert_eq!(grouping, vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]]);
        assert_eq!(seq.state(), crate::community::SequenceState::Producing);

        let p = builder.build(&g);
        assert_eq!(p[&0], 0);
        assert_eq!(p[&1], 0);
        assert!((2..8).all(|n| p[&n] == 1));
    }

    #[test]
    fn assemble_truncates_and_reconciles() {
        let g = from_edges(&[(0, 1), (1, 2), (2, 3)]);
        let builder = PartitionBuilder::new(2).unwrap();
        let grouping: Grouping = vec![vec![0], vec![1], vec![2, 3]];
        let p = builder.assemble(&g, &grouping);
        assert_eq!(p.len(), 4);
        assert_eq!(p[&0], 0);
        assert_eq!(p[&1], 1);
        assert_eq!(p[&2], 1);
        assert_eq!(p[&3], 1);
    }

    #[test]
    fn fallback_uses_first_level() {
        let g = from_edges(&[(0, 1), (1, 2)]);
        let builder = PartitionBuilder::new(5).unwrap();
        let mut seq = GirvanNewman::new(&g);
        let grouping = builder.select_grouping(&mut seq);
        assert_eq!(grouping.len(), 2);
    }

    #[test]
    fn components_matching_target_are_kept() {
        let g = from_edges(&[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
        let p = detect_communities_by_count(&g, 2).unwrap();
        assert!([0, 1, 2].iter().all(|n| p[n] == 0));
        assert!([3, 4, 5].iter().all(|n| p[n] == 1));
    }

    #[test]
    fn empty_graph_gives_empty_partition() {
        let g = GraphBuilder::new().build();
        assert!(detect_communities_by_count(&g, 3).unwrap().is_empty());
    }
}
