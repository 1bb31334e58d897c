use std::path::PathBuf;

use crate::graph::NodeId;

/// Result alias for `karate_club`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by loading, centrality, community and clustering routines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Feature rows of differing width.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    #[error("cannot create {requested} clusters from {n_items} items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// Invalid argument value.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// An input file the caller asked for does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A line of an edge list could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Graph source name not recognised.
    #[error("unknown source: {0}. Use 'builtin' (alias 'networkx') or 'edgelist'")]
    UnknownSource(String),

    /// A node id that is not part of the graph (or not covered by a partition).
    #[error("node {0} not found")]
    UnknownNode(NodeId),

    /// Categorical attribute value with no numeric mapping.
    #[error("no numeric mapping for attribute value '{0}'")]
    UnmappedValue(String),

    /// Modularity of a graph without edges.
    #[error("a graph without links has an undefined modularity")]
    UndefinedModularity,

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a metadata or config file.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
