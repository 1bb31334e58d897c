//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS, reported as `inertia`).
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centroids via k-means++
//! 2. **Assign**: each point → nearest centroid
//! 3. **Update**: each centroid → mean of its points
//! 4. Repeat until centroids stop moving
//!
//! Lloyd only finds a local minimum, so the fit is restarted `n_init` times
//! from fresh k-means++ seeds and the run with the lowest inertia is kept.
//! All restarts draw from one seeded generator: the same seed gives the same
//! labels.
//!
//! ## K-means++ Initialization
//!
//! 1. Choose first centroid uniformly at random
//! 2. Choose each next centroid with probability proportional to D(x)²
//!    (squared distance to the nearest existing centroid)

use super::scale::to_array;
use super::traits::Clustering;
use crate::config::KmeansConfig;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations per restart.
    max_iter: usize,
    /// Convergence tolerance on total squared centroid shift.
    tol: f64,
    /// Random seed.
    seed: Option<u64>,
    /// Number of restarts.
    n_init: usize,
}

/// Outcome of a K-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Cluster label per row.
    pub labels: Vec<usize>,
    /// `k × d` centroids.
    pub centroids: Array2<f64>,
    /// Sum of squared distances to the assigned centroid.
    pub inertia: f64,
    /// Lloyd iterations of the winning restart.
    pub iterations: usize,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            seed: None,
            n_init: 1,
        }
    }

    /// Clusterer configured from [`KmeansConfig`].
    pub fn from_config(config: &KmeansConfig) -> Self {
        Self::new(config.n_clusters)
            .with_seed(config.seed)
            .with_n_init(config.n_init)
            .with_max_iter(config.max_iter)
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of restarts (at least one run always happens).
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// Fit and return labels, centroids and inertia of the best restart.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KmeansFit> {
        let data = to_array(data)?;
        let n = data.nrows();
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut best: Option<KmeansFit> = None;
        for run in 0..self.n_init {
            let fit = self.lloyd(&data, &mut rng);
            log::trace!("kmeans restart {run}: inertia {:.6}", fit.inertia);
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }
        best.ok_or(Error::EmptyInput)
    }

    /// One Lloyd run from a fresh k-means++ seeding.
    fn lloyd(&self, data: &Array2<f64>, rng: &mut impl Rng) -> KmeansFit {
        let (n, d) = data.dim();
        let mut centroids = self.init_centroids(data, rng);
        let mut labels = vec![0usize; n];
        let mut iterations = 0;

        for iter in 0..self.max_iter {
            self.assign(data, &centroids, &mut labels);

            let mut new_centroids = Array2::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];
            for (i, &k) in labels.iter().enumerate() {
                let mut row = new_centroids.row_mut(k);
                row += &data.row(i);
                counts[k] += 1;
            }
            for (k, &count) in counts.iter().enumerate() {
                if count > 0 {
                    new_centroids.row_mut(k).mapv_inplace(|x| x / count as f64);
                } else {
                    // Empty cluster: reseed from a random point
                    let idx = rng.random_range(0..n);
                    new_centroids.row_mut(k).assign(&data.row(idx));
                }
            }

            let shift: f64 = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            centroids = new_centroids;
            iterations = iter + 1;

            if shift < self.tol {
                break;
            }
        }

        self.assign(data, &centroids, &mut labels);
        let inertia = labels
            .iter()
            .enumerate()
            .map(|(i, &k)| squared_distance(&data.row(i), &centroids.row(k)))
            .sum();

        KmeansFit {
            labels,
            centroids,
            inertia,
            iterations,
        }
    }

    /// Nearest-centroid assignment.
    fn assign(&self, data: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [usize]) {
        let nearest = |i: usize| {
            let point = data.row(i);
            let mut best_cluster = 0;
            let mut best_dist = f64::MAX;
            for k in 0..self.k {
                let dist = squared_distance(&point, &centroids.row(k));
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = k;
                }
            }
            best_cluster
        };

        #[cfg(feature = "parallel")]
        labels
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, label)| *label = nearest(i));

        #[cfg(not(feature = "parallel"))]
        for (i, label) in labels.iter_mut().enumerate() {
            *label = nearest(i);
        }
    }

    /// Initialize centroids using k-means++.
    fn init_centroids(&self, data: &Array2<f64>, rng: &mut impl Rng) -> Array2<f64> {
        let (n, d) = data.dim();
        let mut centroids = Array2::zeros((self.k, d));

        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        for i in 1..self.k {
            let distances: Vec<f64> = (0..n)
                .map(|j| {
                    (0..i)
                        .map(|c| squared_distance(&data.row(j), &centroids.row(c)))
                        .fold(f64::MAX, f64::min)
                })
                .collect();

            let total: f64 = distances.iter().sum();
            if total == 0.0 {
                let idx = rng.random_range(0..n);
                centroids.row_mut(i).assign(&data.row(idx));
                continue;
            }

            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            let mut selected = n - 1;
            for (j, &dist) in distances.iter().enumerate() {
                cumsum += dist;
                if cumsum >= threshold {
                    selected = j;
                    break;
                }
            }
            centroids.row_mut(i).assign(&data.row(selected));
        }

        centroids
    }
}

/// Squared Euclidean distance.
fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.1],
        ]
    }

    #[test]
    fn test_kmeans_basic() {
        let labels = Kmeans::new(2).with_seed(42).fit_predict(&two_blobs()).unwrap();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_kmeans_all_points_assigned() {
        let data: Vec<Vec<f64>> = (0..50)
            .map(|i| vec![i as f64 * 0.1, (i % 5) as f64])
            .collect();

        let labels = Kmeans::new(5).with_seed(123).fit_predict(&data).unwrap();

        assert_eq!(labels.len(), data.len());
        for &label in &labels {
            assert!(label < 5, "label {} out of range", label);
        }
    }

    #[test]
    fn test_kmeans_k_equals_n() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = Kmeans::new(3).with_seed(42).fit_predict(&data).unwrap();

        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_kmeans_deterministic_with_seed() {
        let a = Kmeans::new(2).with_seed(42).with_n_init(10).fit(&two_blobs()).unwrap();
        let b = Kmeans::new(2).with_seed(42).with_n_init(10).fit(&two_blobs()).unwrap();
        assert_eq!(a.labels, b.labels, "same seed should give same result");
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn test_restarts_never_worse_than_first_run() {
        let data: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![(i % 7) as f64, (i % 3) as f64 * 2.5, (i / 10) as f64])
            .collect();
        let single = Kmeans::new(4).with_seed(7).fit(&data).unwrap();
        let many = Kmeans::new(4).with_seed(7).with_n_init(10).fit(&data).unwrap();
        assert!(many.inertia <= single.inertia + 1e-12);
    }

    #[test]
    fn test_inertia_of_tight_blobs() {
        let fit = Kmeans::new(2).with_seed(1).fit(&two_blobs()).unwrap();
        // each pair sits 0.1·√2 apart: 2 × 2 × (0.05² + 0.05²)
        assert!((fit.inertia - 0.02).abs() < 1e-9);
        assert_eq!(fit.centroids.dim(), (2, 2));
    }

    #[test]
    fn test_kmeans_empty_input_error() {
        let data: Vec<Vec<f64>> = vec![];
        assert!(Kmeans::new(2).fit_predict(&data).is_err());
    }

    #[test]
    fn test_kmeans_k_larger_than_n_error() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        assert!(matches!(
            Kmeans::new(5).fit_predict(&data),
            Err(Error::InvalidClusterCount { requested: 5, n_items: 2 })
        ));
    }
}
