//! Clustering graph nodes by their centrality profile.

use super::hierarchical::{HierarchicalClustering, Linkage};
use super::kmeans::{Kmeans, KmeansFit};
use super::scale::standardize;
use super::traits::Clustering;
use crate::centrality::CentralityTable;
use crate::config::KmeansConfig;
use crate::error::{Error, Result};
use crate::graph::{NodeId, Partition, Scores};
use serde::Serialize;

/// Feature rows aligned with their node ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    /// One row per node.
    pub rows: Vec<Vec<f64>>,
    /// Node id of each row.
    pub nodes: Vec<NodeId>,
    /// Column names.
    pub columns: Vec<String>,
}

/// Degree, betweenness and closeness per node, plus an optional numeric
/// attribute column (nodes without a value get `0.0`).
pub fn prepare_node_features(table: &CentralityTable, attribute: Option<&Scores>) -> FeatureMatrix {
    let mut columns = vec![
        "degree_centrality".to_string(),
        "betweenness_centrality".to_string(),
        "closeness_centrality".to_string(),
    ];
    if attribute.is_some() {
        columns.push("attribute".to_string());
    }

    let rows = table
        .rows()
        .iter()
        .map(|r| {
            let mut row = vec![r.degree, r.betweenness, r.closeness];
            if let Some(values) = attribute {
                row.push(values.get(&r.node).copied().unwrap_or(0.0));
            }
            row
        })
        .collect();

    FeatureMatrix {
        rows,
        nodes: table.nodes(),
        columns,
    }
}

/// Standardize `features` and run K-means.
pub fn kmeans_clustering(features: &[Vec<f64>], config: &KmeansConfig) -> Result<KmeansFit> {
    let scaled = standardize(features)?;
    Kmeans::from_config(config).fit(&scaled)
}

/// Standardize `features` and run agglomerative clustering.
pub fn hierarchical_clustering(
    features: &[Vec<f64>],
    n_clusters: usize,
    linkage: Linkage,
) -> Result<Vec<usize>> {
    let scaled = standardize(features)?;
    HierarchicalClustering::new(n_clusters)
        .with_linkage(linkage)
        .fit_predict(&scaled)
}

/// Pair node ids with cluster labels.
pub fn assignments_by_node(nodes: &[NodeId], labels: &[usize]) -> Result<Partition> {
    if nodes.len() != labels.len() {
        return Err(Error::DimensionMismatch {
            expected: nodes.len(),
            found: labels.len(),
        });
    }
    Ok(nodes.iter().copied().zip(labels.iter().copied()).collect())
}
