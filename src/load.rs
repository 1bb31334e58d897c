//! Loading the Zachary Karate Club network.
//!
//! The graph is either the builtin copy of the dataset (34 members, 78
//! friendship ties, each member tagged with the faction it joined after the
//! split) or an edge list on disk. A JSON metadata file can accompany either.

use crate::config::LoadConfig;
use crate::error::{Error, Result};
use crate::graph::{ClubGraph, GraphBuilder, Member, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Free-form dataset metadata.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Attribute name carrying each member's faction.
pub const CLUB_ATTRIBUTE: &str = "club";

/// Faction led by the instructor.
pub const MR_HI: &str = "Mr. Hi";

/// Faction led by the club president.
pub const OFFICER: &str = "Officer";

/// Members who followed the instructor.
const MR_HI_MEMBERS: [NodeId; 17] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13, 16, 17, 19, 21];

/// Friendship ties, 0-based, as recorded by Zachary (1977).
#[rustfmt::skip]
const KARATE_EDGES: [(NodeId, NodeId); 78] = [
    (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), (0, 8),
    (0, 10), (0, 11), (0, 12), (0, 13), (0, 17), (0, 19), (0, 21), (0, 31),
    (1, 2), (1, 3), (1, 7), (1, 13), (1, 17), (1, 19), (1, 21), (1, 30),
    (2, 3), (2, 7), (2, 8), (2, 9), (2, 13), (2, 27), (2, 28), (2, 32),
    (3, 7), (3, 12), (3, 13),
    (4, 6), (4, 10),
    (5, 6), (5, 10), (5, 16),
    (6, 16),
    (8, 30), (8, 32), (8, 33),
    (9, 33),
    (13, 33),
    (14, 32), (14, 33),
    (15, 32), (15, 33),
    (18, 32), (18, 33),
    (19, 33),
    (20, 32), (20, 33),
    (22, 32), (22, 33),
    (23, 25), (23, 27), (23, 29), (23, 32), (23, 33),
    (24, 25), (24, 27), (24, 31),
    (25, 31),
    (26, 29), (26, 33),
    (27, 33),
    (28, 31), (28, 33),
    (29, 32), (29, 33),
    (30, 32), (30, 33),
    (31, 32), (31, 33),
    (32, 33),
];

/// Where to take the graph from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphSource {
    /// The builtin dataset.
    #[default]
    #[serde(alias = "networkx")]
    Builtin,
    /// A whitespace-separated edge list file.
    Edgelist,
}

impl FromStr for GraphSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "builtin" | "networkx" => Ok(Self::Builtin),
            "edgelist" => Ok(Self::Edgelist),
            other => Err(Error::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::Edgelist => write!(f, "edgelist"),
        }
    }
}

/// The builtin Zachary Karate Club graph.
///
/// Nodes are `0..34` in order; every node carries a `club` attribute.
pub fn karate_club_graph() -> ClubGraph {
    let mut builder = GraphBuilder::new();
    for id in 0..34 {
        let club = if MR_HI_MEMBERS.contains(&id) {
            MR_HI
        } else {
            OFFICER
        };
        builder.add_member(Member::new(id).with_attribute(CLUB_ATTRIBUTE, club));
    }
    for &(u, v) in &KARATE_EDGES {
        builder.add_edge(u, v);
    }
    builder.build()
}

/// Parse edge list text: one `u v` pair per line, anything after the pair is
/// ignored, `#` starts a comment.
pub fn parse_edgelist(text: &str) -> Result<ClubGraph> {
    let mut builder = GraphBuilder::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(u), Some(v)) = (tokens.next(), tokens.next()) else {
            return Err(Error::Parse {
                line: lineno + 1,
                message: format!("expected two node ids, got '{line}'"),
            });
        };
        let parse = |tok: &str| {
            tok.parse::<NodeId>().map_err(|e| Error::Parse {
                line: lineno + 1,
                message: format!("invalid node id '{tok}': {e}"),
            })
        };
        builder.add_edge(parse(u)?, parse(v)?);
    }
    Ok(builder.build())
}

/// Load a graph from an edge list file.
pub fn load_from_edgelist(path: impl AsRef<Path>) -> Result<ClubGraph> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let graph = parse_edgelist(&text)?;
    log::debug!(
        "loaded {} nodes / {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// Load dataset metadata. A missing file yields an empty map.
pub fn load_metadata(path: impl AsRef<Path>) -> Result<Metadata> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("no metadata at {}", path.display());
        return Ok(Metadata::new());
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load the graph from the configured source together with its metadata.
pub fn load_graph(config: &LoadConfig) -> Result<(ClubGraph, Metadata)> {
    let graph = match config.source {
        GraphSource::Builtin => karate_club_graph(),
        GraphSource::Edgelist => load_from_edgelist(&config.edgelist_path)?,
    };
    let metadata = load_metadata(&config.metadata_path)?;
    log::info!(
        "graph from {}: {} nodes, {} edges",
        config.source,
        graph.node_count(),
        graph.edge_count()
    );
    Ok((graph, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_graph_shape() {
        let g = karate_club_graph();
        assert_eq!(g.node_count(), 34);
        assert_eq!(g.edge_count(), 78);
        let hi = g
            .node_weights()
            .filter(|m| m.attributes.get(CLUB_ATTRIBUTE).map(String::as_str) == Some(MR_HI))
            .count();
        assert_eq!(hi, 17);
    }

    #[test]
    fn parse_skips_comments_and_extra_columns() {
        let text = "# header\n1 2 {}\n\n2 3 # trailing\n3 1\n";
        let g = parse_edgelist(text).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        let err = parse_edgelist("1 2\n3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = parse_edgelist("a b\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn source_from_str() {
        assert_eq!("networkx".parse::<GraphSource>().unwrap(), GraphSource::Builtin);
        assert_eq!("edgelist".parse::<GraphSource>().unwrap(), GraphSource::Edgelist);
        assert_eq!("builtin".parse::<GraphSource>().unwrap(), GraphSource::Builtin);
        let err = "csv".parse::<GraphSource>().unwrap_err();
        assert!(matches!(err, Error::UnknownSource(_)));
        let message = err.to_string();
        assert!(message.contains("'builtin'"), "{message}");
        assert!(message.contains("'edgelist'"), "{message}");
    }

    #[test]
    fn missing_edgelist_is_an_error() {
        let err = load_from_edgelist("/definitely/not/here.edgelist").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn missing_metadata_is_empty() {
        let meta = load_metadata("/definitely/not/here.json").unwrap();
        assert!(meta.is_empty());
    }
}
