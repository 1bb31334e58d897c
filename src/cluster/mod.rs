//! Clustering nodes by feature similarity.
//!
//! Each node is described by a small feature vector (its centralities, and
//! optionally a numeric attribute). Columns are standardized first so no
//! single measure dominates the distance, then grouped with one of two
//! algorithms.
//!
//! ### K-means
//!
//! Assign each point to the nearest centroid, move centroids to the mean of
//! their points, repeat. Minimizes within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Assumes roughly spherical, similarly sized clusters and a known k.
//!
//! ### Hierarchical (Agglomerative) Clustering
//!
//! Start with every point alone and repeatedly merge the two closest
//! clusters. The merge history forms a **dendrogram** that can be cut into
//! any number of clusters.
//!
//! ## Usage
//!
//! ```rust
//! use karate_club::cluster::{Clustering, HierarchicalClustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let labels = HierarchicalClustering::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

mod dendrogram;
mod hierarchical;
mod kmeans;
mod nodes;
mod scale;
mod traits;

pub use dendrogram::{Dendrogram, Merge};
pub use hierarchical::{HierarchicalClustering, Linkage};
pub use kmeans::{Kmeans, KmeansFit};
pub use nodes::{
    assignments_by_node, hierarchical_clustering, kmeans_clustering, prepare_node_features,
    FeatureMatrix,
};
pub use scale::standardize;
pub use traits::Clustering;
