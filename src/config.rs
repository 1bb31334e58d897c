//! Configuration for a full analysis run.
//!
//! Every knob that used to be a buried default (file paths, seeds, cluster
//! counts) lives here and is passed explicitly. All structs deserialize from
//! JSON with missing fields falling back to [`Default`].

use crate::cluster::Linkage;
use crate::error::{Error, Result};
use crate::load::GraphSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the graph and its metadata come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Graph source.
    pub source: GraphSource,
    /// Edge list read when `source` is [`GraphSource::Edgelist`].
    pub edgelist_path: PathBuf,
    /// Optional JSON metadata file.
    pub metadata_path: PathBuf,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            source: GraphSource::Builtin,
            edgelist_path: PathBuf::from("data/karate.edgelist"),
            metadata_path: PathBuf::from("data/metadata.json"),
        }
    }
}

/// Community detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityConfig {
    /// Target community count for Girvan-Newman.
    pub num_communities: usize,
    /// Louvain resolution.
    pub resolution: f64,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            num_communities: 2,
            resolution: 1.0,
        }
    }
}

/// K-means settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmeansConfig {
    /// Number of clusters.
    pub n_clusters: usize,
    /// Seed for centroid initialisation.
    pub seed: u64,
    /// Independent restarts; the lowest-inertia run wins.
    pub n_init: usize,
    /// Iteration cap per restart.
    pub max_iter: usize,
}

impl Default for KmeansConfig {
    fn default() -> Self {
        Self {
            n_clusters: 2,
            seed: 42,
            n_init: 10,
            max_iter: 300,
        }
    }
}

/// Feature clustering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// K-means settings.
    pub kmeans: KmeansConfig,
    /// Cluster count for agglomerative clustering.
    pub hierarchical_clusters: usize,
    /// Linkage for agglomerative clustering.
    pub linkage: Linkage,
    /// Node attribute appended to the feature matrix (categorical, mapped to numbers).
    pub attribute: Option<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            kmeans: KmeansConfig::default(),
            hierarchical_clusters: 2,
            linkage: Linkage::Ward,
            attribute: None,
        }
    }
}

/// Settings for [`crate::analysis::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Input.
    pub load: LoadConfig,
    /// Community detection.
    pub communities: CommunityConfig,
    /// Feature clustering.
    pub clustering: ClusterConfig,
    /// How many top nodes to report per centrality measure.
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            load: LoadConfig::default(),
            communities: CommunityConfig::default(),
            clustering: ClusterConfig::default(),
            top_n: 5,
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no routine can honour.
    pub fn validate(&self) -> Result<()> {
        if self.communities.num_communities == 0 {
            return Err(Error::InvalidArgument {
                name: "num_communities",
                message: "must be >= 1",
            });
        }
        if !self.communities.resolution.is_finite() || self.communities.resolution <= 0.0 {
            return Err(Error::InvalidArgument {
                name: "resolution",
                message: "must be finite and > 0",
            });
        }
        if self.clustering.kmeans.n_clusters == 0 || self.clustering.hierarchical_clusters == 0 {
            return Err(Error::InvalidArgument {
                name: "n_clusters",
                message: "must be >= 1",
            });
        }
        if self.clustering.kmeans.n_init == 0 || self.clustering.kmeans.max_iter == 0 {
            return Err(Error::InvalidArgument {
                name: "kmeans",
                message: "n_init and max_iter must be > 0",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.communities.num_communities, 2);
        assert_eq!(config.clustering.kmeans.seed, 42);
        assert_eq!(config.clustering.linkage, Linkage::Ward);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{ "communities": { "num_communities": 4 }, "load": { "source": "networkx" } }"#,
        )
        .unwrap();
        assert_eq!(config.communities.num_communities, 4);
        assert_eq!(config.communities.resolution, 1.0);
        assert_eq!(config.load.source, GraphSource::Builtin);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn zero_communities_rejected() {
        let mut config = AnalysisConfig::default();
        config.communities.num_communities = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidArgument { name: "num_communities", .. })
        ));
    }
}
