//! Grouping converged points by mode
//!
//! A single sequential pass: every shifted point joins the *first* cluster,
//! in creation order, whose mode is within tolerance; otherwise it founds a
//! new cluster with its own coordinates as the mode. Modes are never
//! re-centred and clusters are never merged, so the outcome depends on
//! processing order when points sit near the tolerance boundary.

use crate::types::Cluster;
use msc_core::{Metric, Scalar};

/// Incremental first-match clusterer
#[derive(Debug, Clone)]
pub struct ModeClusterer<'a, T: Scalar, M> {
    metric: &'a M,
    epsilon: f64,
    clusters: Vec<Cluster<T>>,
}

impl<'a, T: Scalar, M: Metric> ModeClusterer<'a, T, M> {
    /// Create an empty clusterer matching modes within `epsilon`
    pub fn new(metric: &'a M, epsilon: f64) -> Self {
        Self {
            metric,
            epsilon,
            clusters: Vec::new(),
        }
    }

    /// Assign input point `index`, shifted to `position`, to a cluster.
    ///
    /// Returns the cluster index.
    pub fn assign(&mut self, index: usize, position: &[T]) -> usize {
        let found = self
            .clusters
            .iter()
            .position(|c| self.metric.distance(position, c.mode()) <= self.epsilon);

        let c = match found {
            Some(c) => c,
            None => {
                self.clusters.push(Cluster::new(position.to_vec()));
                self.clusters.len() - 1
            }
        };
        self.clusters[c].push(index);
        c
    }

    /// Clusters discovered so far
    pub fn clusters(&self) -> &[Cluster<T>] {
        &self.clusters
    }

    /// Finish and return the clusters in creation order
    pub fn finish(self) -> Vec<Cluster<T>> {
        self.clusters
    }
}

/// Cluster a sequence of shifted positions.
///
/// Member indices are positions in `shifted`.
pub fn cluster_modes<T, S, M>(shifted: &[S], metric: &M, epsilon: f64) -> Vec<Cluster<T>>
where
    T: Scalar,
    S: AsRef<[T]>,
    M: Metric,
{
    let mut clusterer = ModeClusterer::new(metric, epsilon);
    for (i, point) in shifted.iter().enumerate() {
        clusterer.assign(i, point.as_ref());
    }
    clusterer.finish()
}
