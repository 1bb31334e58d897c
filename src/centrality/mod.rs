//! Node centrality measures.
//!
//! | Measure | Question answered | Cost |
//! |---------|-------------------|------|
//! | Degree | How many direct ties? | O(V + E) |
//! | Betweenness | How often on shortest paths? | O(VE) |
//! | Closeness | How near to everyone else? | O(VE) |
//!
//! Edge betweenness is exposed as well; it drives the Girvan-Newman
//! hierarchy in [`crate::community`].
//!
//! All measures return [`Scores`](crate::graph::Scores) keyed by node id.
//!
//! # References
//!
//! - Freeman (1977). "A set of measures of centrality based on betweenness"
//! - Brandes (2001). "A faster algorithm for betweenness centrality"
//! - Wasserman & Faust (1994). "Social Network Analysis: Methods and Applications"

mod betweenness;
mod closeness;
mod degree;
mod table;

pub(crate) use betweenness::edge_dependencies;
pub use betweenness::{betweenness_centrality, edge_betweenness_centrality};
pub use closeness::closeness_centrality;
pub use degree::degree_centrality;
pub use table::{compute_all_centralities, top_central_nodes, CentralityRow, CentralityTable};
