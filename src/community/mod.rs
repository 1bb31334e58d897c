//! Community detection for graphs.
//!
//! Given a graph, find groupings where nodes within groups are densely
//! connected and connections between groups are sparse.
//!
//! ## The Modularity Objective
//!
//! Partitions are scored with **modularity** Q, which compares the number of
//! edges inside communities with the number expected in a random graph with
//! the same degree sequence:
//!
//! ```text
//! Q = (1/2m) × Σ[A_ij - γ(k_i × k_j)/(2m)] × δ(c_i, c_j)
//! ```
//!
//! A good partition has Q > 0.
//!
//! ## Algorithms
//!
//! ### Girvan-Newman (divisive)
//!
//! Repeatedly delete the edge with the highest edge betweenness. Edges that
//! bridge communities carry many shortest paths, so they go first and the
//! graph falls apart along community boundaries. [`GirvanNewman`] exposes the
//! resulting hierarchy one level at a time; [`PartitionBuilder`] turns it into
//! a partition with a requested number of communities.
//!
//! ### Louvain (agglomerative)
//!
//! Greedy modularity optimization with graph coarsening
//! ([Blondel et al. 2008](https://arxiv.org/abs/0803.0476)). The number of
//! communities is chosen by the algorithm.
//!
//! ## Usage
//!
//! ```rust
//! use karate_club::community::{detect_communities_by_count, louvain_communities};
//! use karate_club::load::karate_club_graph;
//!
//! let graph = karate_club_graph();
//! let split = detect_communities_by_count(&graph, 2).unwrap();
//! assert_eq!(split.len(), 34);
//!
//! let (partition, q) = louvain_communities(&graph).unwrap();
//! assert_eq!(partition.len(), 34);
//! assert!(q > 0.0);
//! ```
//!
//! ## References
//!
//! - Girvan & Newman (2002). "Community structure in social and biological networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."

mod girvan_newman;
mod louvain;
mod modularity;
mod partition_builder;
mod traits;

pub use girvan_newman::{GirvanNewman, Grouping, SequenceState};
pub use louvain::{louvain_communities, Louvain};
pub use modularity::{community_count, community_members, modularity};
pub use partition_builder::{detect_communities_by_count, PartitionBuilder};
pub use traits::CommunityDetection;
