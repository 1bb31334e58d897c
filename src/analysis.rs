//! End-to-end analysis of one graph.
//!
//! Runs every measure in the crate with the settings of an
//! [`AnalysisConfig`] and gathers the results in a serializable
//! [`AnalysisReport`].

use crate::attributes::{attribute_to_numeric, node_attributes};
use crate::centrality::{compute_all_centralities, top_central_nodes, CentralityTable};
use crate::cluster::{
    assignments_by_node, hierarchical_clustering, kmeans_clustering, prepare_node_features,
};
use crate::community::{community_count, modularity, CommunityDetection, Louvain, PartitionBuilder};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::graph::{ClubGraph, NodeId, Partition};
use crate::load::{load_graph, Metadata, CLUB_ATTRIBUTE};
use crate::metrics::{partition_agreement, Agreement};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Highest-ranked nodes per centrality measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopNodes {
    /// By degree centrality.
    pub degree: Vec<(NodeId, f64)>,
    /// By betweenness centrality.
    pub betweenness: Vec<(NodeId, f64)>,
    /// By closeness centrality.
    pub closeness: Vec<(NodeId, f64)>,
}

/// A partition plus how good it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupingResult {
    /// Node → community (or cluster).
    pub assignments: Partition,
    /// Distinct groups used.
    pub groups: usize,
    /// Modularity on the analysed graph, when defined.
    pub modularity: Option<f64>,
    /// Agreement with the recorded club split, when the graph carries it.
    pub club_agreement: Option<Agreement>,
}

/// Everything computed by [`run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Node count.
    pub nodes: usize,
    /// Edge count.
    pub edges: usize,
    /// Dataset metadata, if any was loaded.
    pub metadata: Metadata,
    /// Per-node centralities.
    pub centralities: CentralityTable,
    /// Top nodes per measure.
    pub top_nodes: TopNodes,
    /// Girvan-Newman with the configured community count.
    pub girvan_newman: GroupingResult,
    /// Louvain.
    pub louvain: GroupingResult,
    /// K-means over standardized node features.
    pub kmeans: GroupingResult,
    /// K-means inertia.
    pub kmeans_inertia: f64,
    /// Agglomerative clustering over standardized node features.
    pub hierarchical: GroupingResult,
}

/// Load the configured graph and analyse it.
pub fn run_from_config(config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;
    let (graph, metadata) = load_graph(&config.load)?;
    let mut report = run(&graph, config)?;
    report.metadata = metadata;
    Ok(report)
}

/// Analyse `graph` with `config`.
pub fn run(graph: &ClubGraph, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;
    let clubs = club_labels(graph)?;
    let grade = |assignments: Partition| -> Result<GroupingResult> {
        let q = match modularity(graph, &assignments) {
            Ok(q) => Some(q),
            Err(Error::UndefinedModularity) => None,
            Err(e) => return Err(e),
        };
        Ok(GroupingResult {
            groups: community_count(&assignments),
            modularity: q,
            club_agreement: clubs.as_ref().map(|c| partition_agreement(&assignments, c)),
            assignments,
        })
    };

    let centralities = compute_all_centralities(graph);
    let top_nodes = TopNodes {
        degree: top_central_nodes(&centralities.column(|r| r.degree), config.top_n),
        betweenness: top_central_nodes(&centralities.column(|r| r.betweenness), config.top_n),
        closeness: top_central_nodes(&centralities.column(|r| r.closeness), config.top_n),
    };
    log::info!("centralities computed for {} nodes", centralities.len());

    let girvan_newman =
        grade(PartitionBuilder::new(config.communities.num_communities)?.detect(graph)?)?;
    let louvain = grade(
        Louvain::new()
            .with_resolution(config.communities.resolution)
            .detect(graph)?,
    )?;
    log::info!(
        "communities: girvan-newman {} groups, louvain {} groups",
        girvan_newman.groups,
        louvain.groups
    );

    let attribute = match &config.clustering.attribute {
        Some(name) => Some(attribute_to_numeric(&node_attributes(graph, name), None)?),
        None => None,
    };
    let features = prepare_node_features(&centralities, attribute.as_ref());

    let fit = kmeans_clustering(&features.rows, &config.clustering.kmeans)?;
    let kmeans_inertia = fit.inertia;
    let kmeans = grade(assignments_by_node(&features.nodes, &fit.labels)?)?;

    let labels = hierarchical_clustering(
        &features.rows,
        config.clustering.hierarchical_clusters,
        config.clustering.linkage,
    )?;
    let hierarchical = grade(assignments_by_node(&features.nodes, &labels)?)?;
    log::info!(
        "clustering: kmeans {} clusters (inertia {kmeans_inertia:.4}), hierarchical {} clusters",
        kmeans.groups,
        hierarchical.groups
    );

    Ok(AnalysisReport {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        metadata: Metadata::new(),
        centralities,
        top_nodes,
        girvan_newman,
        louvain,
        kmeans,
        kmeans_inertia,
        hierarchical,
    })
}

/// Club attribute as numeric labels, if any node carries one.
fn club_labels(graph: &ClubGraph) -> Result<Option<BTreeMap<NodeId, usize>>> {
    let clubs = node_attributes(graph, CLUB_ATTRIBUTE);
    if clubs.is_empty() {
        return Ok(None);
    }
    let numeric = attribute_to_numeric(&clubs, None)?;
    Ok(Some(
        numeric.into_iter().map(|(k, v)| (k, v as usize)).collect(),
    ))
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "graph: {} nodes, {} edges", self.nodes, self.edges)?;

        writeln!(f, "\ntop nodes")?;
        for (name, top) in [
            ("degree", &self.top_nodes.degree),
            ("betweenness", &self.top_nodes.betweenness),
            ("closeness", &self.top_nodes.closeness),
        ] {
            let ranked: Vec<String> = top.iter().map(|(n, s)| format!("{n} ({s:.3})")).collect();
            writeln!(f, "  {name:<12} {}", ranked.join(", "))?;
        }

        writeln!(f, "\ngroupings")?;
        for (name, result) in [
            ("girvan-newman", &self.girvan_newman),
            ("louvain", &self.louvain),
            ("kmeans", &self.kmeans),
            ("hierarchical", &self.hierarchical),
        ] {
            write!(f, "  {name:<14} groups={}", result.groups)?;
            if let Some(q) = result.modularity {
                write!(f, " modularity={q:.4}")?;
            }
            if let Some(a) = result.club_agreement {
                write!(f, " club_nmi={:.3} club_ari={:.3}", a.nmi, a.ari)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
