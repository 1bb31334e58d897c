//! # karate-club
//!
//! Network analysis of the Zachary Karate Club: centrality measures,
//! community detection (Girvan-Newman with a requested community count,
//! Louvain) and clustering of nodes by their centrality profile.
//!
//! ```rust
//! use karate_club::{detect_communities_by_count, karate_club_graph};
//!
//! let graph = karate_club_graph();
//! let partition = detect_communities_by_count(&graph, 2).unwrap();
//! assert_ne!(partition[&0], partition[&33]);
//! ```
//!
//! The `parallel` feature runs the K-means assignment step on rayon. The
//! default `cli` feature builds the `karate-club` binary.

pub mod analysis;
pub mod attributes;
pub mod centrality;
pub mod cluster;
pub mod community;
pub mod config;
/// Error types used across the crate.
pub mod error;
pub mod graph;
pub mod load;
pub mod metrics;

pub use analysis::{run, AnalysisReport};
pub use centrality::{
    betweenness_centrality, closeness_centrality, compute_all_centralities, degree_centrality,
    CentralityTable,
};
pub use cluster::{Clustering, HierarchicalClustering, Kmeans, Linkage};
pub use community::{
    detect_communities_by_count, louvain_communities, modularity, CommunityDetection,
    GirvanNewman, Louvain, PartitionBuilder,
};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use graph::{ClubGraph, Member, NodeId, Partition, Scores};
pub use load::{karate_club_graph, load_graph, GraphSource};
pub use metrics::{ari, nmi};
