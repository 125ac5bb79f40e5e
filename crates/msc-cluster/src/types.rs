//! Result types for mean-shift clustering

use msc_core::{Error, Scalar};
use std::fmt;

/// A group of input points that converged to the same mode
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<T: Scalar = f64> {
    mode: Vec<T>,
    members: Vec<usize>,
}

impl<T: Scalar> Cluster<T> {
    /// Create a cluster whose mode is `mode` and which has no members yet
    pub fn new(mode: Vec<T>) -> Self {
        Self {
            mode,
            members: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.members.push(index);
    }

    /// Shifted coordinates of the point that founded this cluster
    pub fn mode(&self) -> &[T] {
        &self.mode
    }

    /// Indices into the original input, in processing order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether input point `index` belongs to this cluster
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Split into mode and members
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>) {
        (self.mode, self.members)
    }
}

impl<T: Scalar> fmt::Display for Cluster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cluster(members={}, mode=[", self.members.len())?;
        for (i, x) in self.mode.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x:.6}")?;
        }
        write!(f, "])")
    }
}

/// Final state of one point after the shifting phase
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftOutcome<T: Scalar = f64> {
    /// Index of the point in the original input
    pub index: usize,
    /// Converged (or last) position
    pub position: Vec<T>,
    /// Mean-shift steps taken
    pub iterations: usize,
    /// Movement dropped to the tolerance before `max_iter` ran out
    pub converged: bool,
    /// Total weight vanished and the point was frozen in place
    pub degenerate: bool,
}

/// Output of one clustering call
#[derive(Debug)]
pub struct ClusteringResult<T: Scalar = f64> {
    clusters: Vec<Cluster<T>>,
    outcomes: Vec<ShiftOutcome<T>>,
    failures: Vec<Error>,
    n_points: usize,
}

impl<T: Scalar> ClusteringResult<T> {
    pub(crate) fn new(
        clusters: Vec<Cluster<T>>,
        outcomes: Vec<ShiftOutcome<T>>,
        failures: Vec<Error>,
        n_points: usize,
    ) -> Self {
        Self {
            clusters,
            outcomes,
            failures,
            n_points,
        }
    }

    /// Clusters in creation order
    pub fn clusters(&self) -> &[Cluster<T>] {
        &self.clusters
    }

    /// Number of clusters
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Shift outcomes of every clustered point, in input order
    pub fn outcomes(&self) -> &[ShiftOutcome<T>] {
        &self.outcomes
    }

    /// Per-point errors for points excluded from clustering
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// Number of input points
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Cluster index of every input point; `None` for failed points
    pub fn labels(&self) -> Vec<Option<usize>> {
        let mut labels = vec![None; self.n_points];
        for (c, cluster) in self.clusters.iter().enumerate() {
            for &i in cluster.members() {
                labels[i] = Some(c);
            }
        }
        labels
    }

    /// Take ownership of the clusters
    pub fn into_clusters(self) -> Vec<Cluster<T>> {
        self.clusters
    }
}
