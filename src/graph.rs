//! Graph representation shared by every analysis routine.
//!
//! The graph is a plain [`petgraph`] undirected graph whose node weights carry
//! the caller-visible node id plus free-form string attributes (the karate
//! dataset records each member's `club`). All algorithms address nodes by
//! [`NodeIndex`] internally and report results keyed by [`NodeId`].

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Caller-visible node identifier.
pub type NodeId = u32;

/// Undirected, unweighted graph used throughout the crate.
pub type ClubGraph = UnGraph<Member, ()>;

/// Node → community (or cluster) index.
pub type Partition = BTreeMap<NodeId, usize>;

/// Node → scalar score.
pub type Scores = BTreeMap<NodeId, f64>;

/// Node weight: an id plus string attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Node id as it appears in input files.
    pub id: NodeId,
    /// Named attributes, e.g. `club`.
    pub attributes: BTreeMap<String, String>,
}

impl Member {
    /// Member without attributes.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Incremental builder that keeps the graph simple: one node per id,
/// no parallel edges, no self-loops.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: ClubGraph,
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (or return the existing one with that id).
    pub fn add_node(&mut self, id: NodeId) -> NodeIndex {
        self.add_member(Member::new(id))
    }

    /// Add a member with attributes. If the id exists, its attributes are extended.
    pub fn add_member(&mut self, member: Member) -> NodeIndex {
        if let Some(&idx) = self.index.get(&member.id) {
            self.graph[idx].attributes.extend(member.attributes);
            return idx;
        }
        let id = member.id;
        let idx = self.graph.add_node(member);
        self.index.insert(id, idx);
        idx
    }

    /// Add an undirected edge, creating endpoints on demand.
    ///
    /// Returns `false` when the edge was a self-loop or already present.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let a = self.add_node(u);
        let b = self.add_node(v);
        if a == b {
            log::warn!("skipping self-loop on node {u}");
            return false;
        }
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Finish building.
    pub fn build(self) -> ClubGraph {
        self.graph
    }
}

/// Build a graph from an edge list. Node order follows first appearance.
pub fn from_edges(edges: &[(NodeId, NodeId)]) -> ClubGraph {
    let mut builder = GraphBuilder::new();
    for &(u, v) in edges {
        builder.add_edge(u, v);
    }
    builder.build()
}

/// Node ids in node-index order.
pub fn node_ids(graph: &ClubGraph) -> Vec<NodeId> {
    graph.node_weights().map(|m| m.id).collect()
}

/// Look up the index of a node id.
pub fn index_of(graph: &ClubGraph, id: NodeId) -> Option<NodeIndex> {
    graph.node_indices().find(|&i| graph[i].id == id)
}

/// Sorted neighbour lists indexed by `NodeIndex::index()`.
pub(crate) fn adjacency(graph: &ClubGraph) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); graph.node_count()];
    for edge in graph.raw_edges() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            adj[a].push(b);
            adj[b].push(a);
        }
    }
    for neighbors in &mut adj {
        neighbors.sort_unstable();
        neighbors.dedup();
    }
    adj
}
