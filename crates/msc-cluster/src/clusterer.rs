//! Mean-shift orchestration
//!
//! A call runs in two phases. The shifting phase hands every point index to
//! the execution engine and waits for all of them; the clustering phase then
//! walks the outcomes in input order on the calling thread. No state is kept
//! between calls.

use crate::builder::MeanShiftBuilder;
use crate::execution::{ExecutionEngine, SequentialEngine};
use crate::modes::ModeClusterer;
use crate::params::MeanShiftParams;
use crate::shift::MeanShiftIterator;
use crate::types::{Cluster, ClusteringResult, ShiftOutcome};
use msc_core::{validate_points, BandwidthEstimator, Kernel, Metric, PointAccessor, Result, Scalar};
use tracing::{debug, instrument};

/// Configured mean-shift clusterer
///
/// Created through [`MeanShiftBuilder`], which checks that the kernel accepts
/// the distances the metric produces.
#[derive(Debug, Clone)]
pub struct MeanShift<M, K, E, X = SequentialEngine> {
    metric: M,
    kernel: K,
    estimator: E,
    engine: X,
    params: MeanShiftParams,
}

impl<M, K, E, X> MeanShift<M, K, E, X>
where
    M: Metric,
    K: Kernel,
    E: BandwidthEstimator,
    X: ExecutionEngine,
{
    pub(crate) fn from_parts(
        metric: M,
        kernel: K,
        estimator: E,
        engine: X,
        params: MeanShiftParams,
    ) -> Self {
        Self {
            metric,
            kernel,
            estimator,
            engine,
            params,
        }
    }

    /// Get the metric
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Get the bandwidth estimator
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Get the execution engine
    pub fn engine(&self) -> &X {
        &self.engine
    }

    /// Get the parameters
    pub fn params(&self) -> &MeanShiftParams {
        &self.params
    }

    /// Shift every point and return the raw per-point results in input order
    fn shift_all<T, P>(&self, points: &[P], dim: usize) -> Result<Vec<Result<ShiftOutcome<T>>>>
    where
        T: Scalar,
        P: PointAccessor<T> + Sync,
    {
        validate_points::<T, P>(points, dim)?;

        debug!(
            n_points = points.len(),
            dim,
            strategy = ?self.engine.strategy(),
            threads = self.engine.num_threads(),
            metric = self.metric.name(),
            kernel = self.kernel.name(),
            estimator = self.estimator.name(),
            "shifting phase started"
        );

        let iter = MeanShiftIterator::new(
            points,
            dim,
            &self.metric,
            &self.kernel,
            &self.estimator,
            &self.params,
        );
        let results = self
            .engine
            .execute_batch(points.len(), |i| iter.shift_point(i));

        debug!(n_points = points.len(), "shifting phase finished");
        Ok(results)
    }

    /// Run the shifting phase only.
    ///
    /// Every point is processed even when one of them fails; the first
    /// per-point error in input order is then returned.
    #[instrument(skip_all, fields(n_points = points.len(), dim = dim))]
    pub fn shift<T, P>(&self, points: &[P], dim: usize) -> Result<Vec<ShiftOutcome<T>>>
    where
        T: Scalar,
        P: PointAccessor<T> + Sync,
    {
        self.shift_all(points, dim)?.into_iter().collect()
    }

    /// Shift every point to its mode and group the results.
    ///
    /// Configuration problems abort the call before any point is shifted.
    /// Points dropped under [`DegenerateWeightPolicy::Fail`] are reported in
    /// [`ClusteringResult::failures`] and belong to no cluster.
    ///
    /// [`DegenerateWeightPolicy::Fail`]: crate::DegenerateWeightPolicy::Fail
    #[instrument(skip_all, fields(n_points = points.len(), dim = dim))]
    pub fn cluster<T, P>(&self, points: &[P], dim: usize) -> Result<ClusteringResult<T>>
    where
        T: Scalar,
        P: PointAccessor<T> + Sync,
    {
        let results = self.shift_all(points, dim)?;

        let mut outcomes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => failures.push(e),
            }
        }

        let mut clusterer = ModeClusterer::new(&self.metric, self.params.cluster_tolerance());
        for outcome in &outcomes {
            clusterer.assign(outcome.index, &outcome.position);
        }
        let clusters = clusterer.finish();

        debug!(
            clusters = clusters.len(),
            failures = failures.len(),
            "clustering phase finished"
        );

        Ok(ClusteringResult::new(
            clusters,
            outcomes,
            failures,
            points.len(),
        ))
    }
}

/// Cluster `points` sequentially with default parameters apart from the
/// convergence tolerance and iteration cap.
///
/// `epsilon` is used both for convergence and for matching modes.
pub fn cluster<T, P, M, K, E>(
    points: &[P],
    dim: usize,
    metric: M,
    kernel: K,
    estimator: E,
    epsilon: f64,
    max_iter: usize,
) -> Result<Vec<Cluster<T>>>
where
    T: Scalar,
    P: PointAccessor<T> + Sync,
    M: Metric,
    K: Kernel,
    E: BandwidthEstimator,
{
    let clusterer = MeanShiftBuilder::new(metric, kernel, estimator)
        .epsilon(epsilon)
        .max_iter(max_iter)
        .build()?;
    Ok(clusterer.cluster(points, dim)?.into_clusters())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::TestDistributions;
    use approx::assert_abs_diff_eq;
    use msc_core::kernels::{Gaussian, ParabolicSq};
    use msc_core::metrics::{L2, L2Sq};
    use msc_core::{Constant, Error};

    #[test]
    fn test_pair_and_outlier() {
        let points = TestDistributions::pair_and_outlier();
        let est = Constant::new(3.0).unwrap();
        let clusters = cluster(&points, 3, L2Sq, ParabolicSq, est, 1e-7, usize::MAX).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members(), &[0, 1]);
        assert_eq!(clusters[1].members(), &[2]);
        assert_abs_diff_eq!(clusters[0].mode()[0], 0.0);
        assert_abs_diff_eq!(clusters[0].mode()[1], 0.0);
        assert_abs_diff_eq!(clusters[0].mode()[2], 0.5, epsilon = 1e-3);
        assert_eq!(clusters[1].mode(), &[10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_result_carries_outcomes() {
        let points = TestDistributions::pair_and_outlier();
        let ms = MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(3.0).unwrap())
            .epsilon(1e-7)
            .build()
            .unwrap();
        let result = ms.cluster(&points, 3).unwrap();

        assert_eq!(result.n_points(), 3);
        assert_eq!(result.outcomes().len(), 3);
        assert!(result.failures().is_empty());
        assert!(result.outcomes().iter().all(|o| o.converged));
        assert_eq!(result.labels(), vec![Some(0), Some(0), Some(1)]);
        // The outlier is alone within its bandwidth
        assert_eq!(result.outcomes()[2].iterations, 1);
    }

    #[test]
    fn test_shift_only() {
        let points = TestDistributions::pair_and_outlier();
        let ms = MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(3.0).unwrap())
            .epsilon(1e-7)
            .build()
            .unwrap();
        let shifted = ms.shift(&points, 3).unwrap();
        assert_eq!(shifted.len(), 3);
        for (i, outcome) in shifted.iter().enumerate() {
            assert_eq!(outcome.index, i);
        }
        assert_abs_diff_eq!(shifted[0].position[2], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_empty_input() {
        let points: Vec<[f64; 2]> = Vec::new();
        let clusters = cluster(&points, 2, L2, Gaussian, Constant::new(1.0).unwrap(), 1e-7, 100)
            .unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_configuration_errors_abort() {
        let est = Constant::new(1.0).unwrap();
        let points = vec![vec![0.0, 0.0], vec![1.0]];

        let err = cluster(&points, 0, L2Sq, ParabolicSq, est.clone(), 1e-7, 10).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = cluster(&points, 2, L2Sq, ParabolicSq, est.clone(), 1e-7, 10).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch { index: 1, expected: 2, actual: 1 }
        ));

        let err = cluster(&points, 1, L2, ParabolicSq, est, 1e-7, 10).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_accessors() {
        let ms = MeanShiftBuilder::new(L2, Gaussian, Constant::new(2.0).unwrap())
            .max_iter(50)
            .build()
            .unwrap();
        assert_eq!(ms.params().max_iter, 50);
        assert_eq!(ms.estimator().bandwidth(), 2.0);
        assert!(!ms.engine().is_parallel());
        assert_eq!(ms.metric().name(), L2.name());
        assert_eq!(ms.kernel().name(), Gaussian.name());
    }
}
