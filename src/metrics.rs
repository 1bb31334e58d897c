//! Agreement between two partitions of the same nodes.
//!
//! Used to compare detected communities or clusters with the recorded
//! faction split of the club.
//!
//! | Metric | Range | Best | Notes |
//! |--------|-------|------|-------|
//! | [`nmi`] | [0, 1] | 1 | Label-permutation invariant |
//! | [`ari`] | [-1, 1] | 1 | 0 for chance-level agreement |
//!
//! # References
//!
//! - Strehl & Ghosh (2002). "Cluster ensembles" (NMI)
//! - Hubert & Arabie (1985). "Comparing partitions" (ARI)

use crate::graph::{NodeId, Partition};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Normalized Mutual Information, `2·I(U;V) / (H(U) + H(V))`.
///
/// Returns 0 for mismatched or empty inputs and 1 when both labelings are
/// constant.
pub fn nmi(pred: &[usize], truth: &[usize]) -> f64 {
    let Some(table) = Contingency::new(pred, truth) else {
        return 0.0;
    };
    let n = table.n as f64;

    let entropy = |counts: &HashMap<usize, usize>| -> f64 {
        counts
            .values()
            .map(|&c| {
                let p = c as f64 / n;
                -p * p.ln()
            })
            .sum()
    };
    let h_pred = entropy(&table.rows);
    let h_truth = entropy(&table.cols);

    let mi: f64 = table
        .joint
        .iter()
        .map(|(&(p, t), &count)| {
            let p_joint = count as f64 / n;
            let p_p = table.rows[&p] as f64 / n;
            let p_t = table.cols[&t] as f64 / n;
            p_joint * (p_joint / (p_p * p_t)).ln()
        })
        .sum();

    let denom = h_pred + h_truth;
    if denom > 0.0 {
        2.0 * mi / denom
    } else {
        1.0
    }
}

/// Adjusted Rand Index.
///
/// Returns 0 for mismatched or empty inputs.
pub fn ari(pred: &[usize], truth: &[usize]) -> f64 {
    let Some(table) = Contingency::new(pred, truth) else {
        return 0.0;
    };

    let pairs = |c: usize| (c * c.saturating_sub(1) / 2) as f64;
    let index: f64 = table.joint.values().map(|&c| pairs(c)).sum();
    let sum_rows: f64 = table.rows.values().map(|&c| pairs(c)).sum();
    let sum_cols: f64 = table.cols.values().map(|&c| pairs(c)).sum();
    let total = pairs(table.n);
    if total == 0.0 {
        return 1.0;
    }

    let expected = sum_rows * sum_cols / total;
    let max_index = (sum_rows + sum_cols) / 2.0;
    let denom = max_index - expected;
    if denom.abs() < 1e-10 {
        return 1.0;
    }
    (index - expected) / denom
}

/// NMI and ARI of a partition against reference labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Agreement {
    /// Normalized mutual information.
    pub nmi: f64,
    /// Adjusted Rand index.
    pub ari: f64,
    /// Nodes present in both maps.
    pub compared: usize,
}

/// Compare `partition` with `reference` on the nodes both cover.
pub fn partition_agreement(partition: &Partition, reference: &BTreeMap<NodeId, usize>) -> Agreement {
    let (pred, truth): (Vec<usize>, Vec<usize>) = partition
        .iter()
        .filter_map(|(node, &c)| reference.get(node).map(|&t| (c, t)))
        .unzip();
    Agreement {
        nmi: nmi(&pred, &truth),
        ari: ari(&pred, &truth),
        compared: pred.len(),
    }
}

struct Contingency {
    joint: HashMap<(usize, usize), usize>,
    rows: HashMap<usize, usize>,
    cols: HashMap<usize, usize>,
    n: usize,
}

impl Contingency {
    fn new(pred: &[usize], truth: &[usize]) -> Option<Self> {
        if pred.len() != truth.len() || pred.is_empty() {
            return None;
        }
        let mut joint = HashMap::new();
        let mut rows = HashMap::new();
        let mut cols = HashMap::new();
        for (&p, &t) in pred.iter().zip(truth) {
            *joint.entry((p, t)).or_insert(0) += 1;
            *rows.entry(p).or_insert(0) += 1;
            *cols.entry(t).or_insert(0) += 1;
        }
        Some(Self {
            joint,
            rows,
            cols,
            n: pred.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nmi_perfect_and_permuted() {
        assert!((nmi(&[0, 0, 1, 1], &[0, 0, 1, 1]) - 1.0).abs() < 1e-12);
        assert!((nmi(&[1, 1, 0, 0], &[0, 0, 1, 1]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nmi_independent() {
        assert!(nmi(&[0, 1, 0, 1], &[0, 0, 1, 1]).abs() < 1e-12);
    }

    #[test]
    fn test_ari_perfect_and_chance() {
        assert!((ari(&[0, 0, 1, 1], &[1, 1, 0, 0]) - 1.0).abs() < 1e-12);
        assert!(ari(&[0, 1, 0, 1], &[0, 0, 1, 1]) < 0.0);
    }

    #[test]
    fn test_mismatched_lengths() {
        assert_eq!(nmi(&[0, 1], &[0]), 0.0);
        assert_eq!(ari(&[], &[]), 0.0);
    }

    #[test]
    fn test_agreement_uses_shared_nodes() {
        let p: Partition = [(0, 0), (1, 0), (2, 1), (3, 1), (9, 0)].into_iter().collect();
        let truth: BTreeMap<NodeId, usize> =
            [(0, 1), (1, 1), (2, 0), (3, 0)].into_iter().collect();
        let a = partition_agreement(&p, &truth);
        assert_eq!(a.compared, 4);
        assert!((a.nmi - 1.0).abs() < 1e-12);
        assert!((a.ari - 1.0).abs() < 1e-12);
    }
}
