//! Node attribute and score helpers.

use crate::error::{Error, Result};
use crate::graph::{index_of, ClubGraph, NodeId, Scores};
use ndarray::Array2;
use std::collections::{BTreeMap, BTreeSet};

/// Value of attribute `name` for every node that has it.
pub fn node_attributes(graph: &ClubGraph, name: &str) -> BTreeMap<NodeId, String> {
    graph
        .node_weights()
        .filter_map(|m| m.attributes.get(name).map(|v| (m.id, v.clone())))
        .collect()
}

/// Map categorical values to numbers.
///
/// Without an explicit `mapping`, distinct values are numbered `0, 1, …` in
/// sorted order.
///
/// # Errors
///
/// [`Error::UnmappedValue`] when `mapping` has no entry for a value.
pub fn attribute_to_numeric(
    attributes: &BTreeMap<NodeId, String>,
    mapping: Option<&BTreeMap<String, f64>>,
) -> Result<Scores> {
    let default_mapping: BTreeMap<String, f64>;
    let mapping = match mapping {
        Some(m) => m,
        None => {
            let distinct: BTreeSet<&String> = attributes.values().collect();
            default_mapping = distinct
                .into_iter()
                .enumerate()
                .map(|(i, v)| (v.clone(), i as f64))
                .collect();
            &default_mapping
        }
    };

    attributes
        .iter()
        .map(|(&node, value)| {
            mapping
                .get(value)
                .map(|&x| (node, x))
                .ok_or_else(|| Error::UnmappedValue(value.clone()))
        })
        .collect()
}

/// Dense adjacency matrix in the given node order (sorted ids by default).
///
/// Returns the matrix together with the node order used.
pub fn adjacency_matrix(
    graph: &ClubGraph,
    nodes: Option<&[NodeId]>,
) -> Result<(Array2<f64>, Vec<NodeId>)> {
    let order: Vec<NodeId> = match nodes {
        Some(n) => n.to_vec(),
        None => {
            let mut ids: Vec<NodeId> = graph.node_weights().map(|m| m.id).collect();
            ids.sort_unstable();
            ids
        }
    };

    let indices = order
        .iter()
        .map(|&id| index_of(graph, id).ok_or(Error::UnknownNode(id)))
        .collect::<Result<Vec<_>>>()?;

    let n = order.len();
    let mut matrix = Array2::zeros((n, n));
    for (r, &a) in indices.iter().enumerate() {
        for (c, &b) in indices.iter().enumerate() {
            if graph.find_edge(a, b).is_some() {
                matrix[[r, c]] = 1.0;
            }
        }
    }
    Ok((matrix, order))
}

/// Min-max scale scores into `[0, 1]`. Constant scores all become `0.5`.
pub fn normalize_scores(scores: &Scores) -> Scores {
    let min = scores.values().copied().fold(f64::INFINITY, f64::min);
    let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return scores.keys().map(|&k| (k, 0.5)).collect();
    }
    scores
        .iter()
        .map(|(&k, &v)| (k, (v - min) / (max - min)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{from_edges, GraphBuilder, Member};

    #[test]
    fn numeric_attributes_default_mapping() {
        let attrs: BTreeMap<NodeId, String> = [(0, "b".into()), (1, "a".into()), (2, "b".into())]
            .into_iter()
            .collect();
        let numeric = attribute_to_numeric(&attrs, None).unwrap();
        assert_eq!(numeric[&0], 1.0);
        assert_eq!(numeric[&1], 0.0);
        assert_eq!(numeric[&2], 1.0);
    }

    #[test]
    fn numeric_attributes_explicit_mapping() {
        let attrs: BTreeMap<NodeId, String> = [(0, "x".into()), (1, "y".into())].into_iter().collect();
        let mapping: BTreeMap<String, f64> = [("x".to_string(), 10.0)].into_iter().collect();
        assert!(matches!(
            attribute_to_numeric(&attrs, Some(&mapping)),
            Err(Error::UnmappedValue(v)) if v == "y"
        ));
    }

    #[test]
    fn attributes_only_for_nodes_that_have_them() {
        let mut b = GraphBuilder::new();
        b.add_member(Member::new(1).with_attribute("club", "Officer"));
        b.add_node(2);
        let attrs = node_attributes(&b.build(), "club");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[&1], "Officer");
    }

    #[test]
    fn adjacency_in_sorted_and_custom_order() {
        let g = from_edges(&[(3, 1), (1, 2)]);
        let (m, order) = adjacency_matrix(&g, None).unwrap();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(m[[0, 1]], 1.0);
        assert_eq!(m[[0, 2]], 1.0);
        assert_eq!(m[[1, 2]], 0.0);
        assert_eq!(m, m.t());

        let (m, _) = adjacency_matrix(&g, Some(&[2, 1])).unwrap();
        assert_eq!(m.dim(), (2, 2));
        assert_eq!(m[[0, 1]], 1.0);

        assert!(matches!(
            adjacency_matrix(&g, Some(&[9])),
            Err(Error::UnknownNode(9))
        ));
    }

    #[test]
    fn normalize_range_and_constant() {
        let s: Scores = [(0, 2.0), (1, 4.0), (2, 3.0)].into_iter().collect();
        let n = normalize_scores(&s);
        assert_eq!(n[&0], 0.0);
        assert_eq!(n[&1], 1.0);
        assert_eq!(n[&2], 0.5);

        let c: Scores = [(0, 7.0), (1, 7.0)].into_iter().collect();
        assert!(normalize_scores(&c).values().all(|&v| v == 0.5));
    }
}
