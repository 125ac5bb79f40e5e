//! Mapping of command-line policy names onto the statically typed policies
//!
//! Each name is matched exactly once per run; the clustering itself is
//! monomorphised for the chosen metric and kernel.

use clap::ValueEnum;
use msc_cluster::{ClusteringResult, MeanShiftBuilder, MeanShiftParams, ParallelEngine};
use msc_core::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Signed sum of component differences
    L1,
    /// Euclidean distance
    L2,
    /// Squared Euclidean distance
    #[value(name = "l2sq")]
    L2Sq,
    /// Cubed Euclidean distance
    #[value(name = "l2cu")]
    L2Cu,
    /// Largest signed component difference
    Inf,
    /// Sum of absolute component differences
    Manhattan,
    /// Largest absolute component difference
    Chebyshev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KernelArg {
    Uniform,
    Triangular,
    Parabolic,
    ParabolicSq,
    Biweight,
    BiweightSq,
    Triweight,
    TriweightSq,
    Tricube,
    TricubeCu,
    Cosine,
    Gaussian,
    GaussianSq,
    Logistic,
    Sigmoid,
    Silverman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimatorArg {
    /// Fixed bandwidth
    Constant,
    /// Adaptive bandwidth from nearest and farthest neighbour distances
    MinMax,
}

/// Estimator chosen at run time
#[derive(Debug, Clone, Copy)]
pub enum AnyEstimator {
    Constant(Constant),
    MinMax(MinMaxDistance),
}

impl AnyEstimator {
    /// Build the estimator for `bandwidth`; `power` only applies to min-max
    pub fn new(kind: EstimatorArg, bandwidth: f64, power: Option<f64>) -> Result<Self> {
        Ok(match kind {
            EstimatorArg::Constant => Self::Constant(Constant::new(bandwidth)?),
            EstimatorArg::MinMax => Self::MinMax(match power {
                Some(p) => MinMaxDistance::new(bandwidth, p)?,
                None => MinMaxDistance::from_bandwidth(bandwidth)?,
            }),
        })
    }
}

impl BandwidthEstimator for AnyEstimator {
    fn inverse_bandwidth<T, P, M>(&self, query: &[T], dataset: &[P], dim: usize, metric: &M) -> f64
    where
        T: Scalar,
        P: PointAccessor<T>,
        M: Metric,
    {
        match self {
            Self::Constant(e) => e.inverse_bandwidth(query, dataset, dim, metric),
            Self::MinMax(e) => e.inverse_bandwidth(query, dataset, dim, metric),
        }
    }

    fn is_adaptive(&self) -> bool {
        match self {
            Self::Constant(e) => e.is_adaptive(),
            Self::MinMax(e) => e.is_adaptive(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Constant(e) => e.name(),
            Self::MinMax(e) => e.name(),
        }
    }
}

/// Everything but the metric and kernel
#[derive(Debug, Clone)]
pub struct Setup {
    pub estimator: AnyEstimator,
    pub engine: ParallelEngine,
    pub params: MeanShiftParams,
}

/// Cluster `points` with the named metric and kernel
pub fn cluster_points(
    metric: MetricArg,
    kernel: KernelArg,
    setup: Setup,
    points: &[Vec<f64>],
    dim: usize,
) -> Result<ClusteringResult<f64>> {
    match metric {
        MetricArg::L1 => with_kernel(L1, kernel, setup, points, dim),
        MetricArg::L2 => with_kernel(L2, kernel, setup, points, dim),
        MetricArg::L2Sq => with_kernel(L2Sq, kernel, setup, points, dim),
        MetricArg::L2Cu => with_kernel(L2Cu, kernel, setup, points, dim),
        MetricArg::Inf => with_kernel(Inf, kernel, setup, points, dim),
        MetricArg::Manhattan => with_kernel(Manhattan, kernel, setup, points, dim),
        MetricArg::Chebyshev => with_kernel(Chebyshev, kernel, setup, points, dim),
    }
}

fn with_kernel<M: Metric>(
    metric: M,
    kernel: KernelArg,
    setup: Setup,
    points: &[Vec<f64>],
    dim: usize,
) -> Result<ClusteringResult<f64>> {
    match kernel {
        KernelArg::Uniform => run(metric, Uniform, setup, points, dim),
        KernelArg::Triangular => run(metric, Triangular, setup, points, dim),
        KernelArg::Parabolic => run(metric, Parabolic, setup, points, dim),
        KernelArg::ParabolicSq => run(metric, ParabolicSq, setup, points, dim),
        KernelArg::Biweight => run(metric, Biweight, setup, points, dim),
        KernelArg::BiweightSq => run(metric, BiweightSq, setup, points, dim),
        KernelArg::Triweight => run(metric, Triweight, setup, points, dim),
        KernelArg::TriweightSq => run(metric, TriweightSq, setup, points, dim),
        KernelArg::Tricube => run(metric, Tricube, setup, points, dim),
        KernelArg::TricubeCu => run(metric, TricubeCu, setup, points, dim),
        KernelArg::Cosine => run(metric, Cosine, setup, points, dim),
        KernelArg::Gaussian => run(metric, Gaussian, setup, points, dim),
        KernelArg::GaussianSq => run(metric, GaussianSq, setup, points, dim),
        KernelArg::Logistic => run(metric, Logistic, setup, points, dim),
        KernelArg::Sigmoid => run(metric, Sigmoid, setup, points, dim),
        KernelArg::Silverman => run(metric, Silverman, setup, points, dim),
    }
}

fn run<M: Metric, K: Kernel>(
    metric: M,
    kernel: K,
    setup: Setup,
    points: &[Vec<f64>],
    dim: usize,
) -> Result<ClusteringResult<f64>> {
    MeanShiftBuilder::new(metric, kernel, setup.estimator)
        .params(setup.params)
        .engine(setup.engine)
        .build()?
        .cluster(points, dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn scenario() -> Vec<Vec<f64>> {
        vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0], vec![10.0, 10.0, 10.0]]
    }

    fn setup(estimator: AnyEstimator) -> Setup {
        Setup {
            estimator,
            engine: ParallelEngine::with_num_threads(2).unwrap(),
            params: MeanShiftParams {
                epsilon: 1e-7,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_default_policies() {
        let est = AnyEstimator::new(EstimatorArg::Constant, 3.0, None).unwrap();
        let result = cluster_points(MetricArg::L2Sq, KernelArg::ParabolicSq, setup(est), &scenario(), 3)
            .unwrap();

        assert_eq!(result.cluster_count(), 2);
        assert_eq!(result.clusters()[0].members(), &[0, 1]);
        assert_abs_diff_eq!(result.clusters()[0].mode()[2], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_mismatched_names_are_rejected() {
        let est = AnyEstimator::new(EstimatorArg::Constant, 3.0, None).unwrap();
        let err = cluster_points(MetricArg::L2, KernelArg::ParabolicSq, setup(est), &scenario(), 3)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_estimator_selection() {
        let est = AnyEstimator::new(EstimatorArg::MinMax, 2.0, None).unwrap();
        match est {
            AnyEstimator::MinMax(e) => assert_eq!(e.power(), 0.25),
            other => panic!("unexpected estimator {other:?}"),
        }
        assert!(est.is_adaptive());
        assert_eq!(est.name(), "MinMaxDistance");

        let est = AnyEstimator::new(EstimatorArg::MinMax, 2.0, Some(1.5)).unwrap();
        match est {
            AnyEstimator::MinMax(e) => assert_eq!(e.power(), 1.5),
            other => panic!("unexpected estimator {other:?}"),
        }

        let est = AnyEstimator::new(EstimatorArg::Constant, 2.0, Some(1.5)).unwrap();
        assert!(!est.is_adaptive());
        assert!(AnyEstimator::new(EstimatorArg::Constant, -1.0, None).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(
            MetricArg::from_str("l2sq", false).unwrap(),
            MetricArg::L2Sq
        );
        assert_eq!(
            KernelArg::from_str("parabolic-sq", false).unwrap(),
            KernelArg::ParabolicSq
        );
        assert_eq!(
            KernelArg::from_str("tricube-cu", false).unwrap(),
            KernelArg::TricubeCu
        );
        assert_eq!(
            EstimatorArg::from_str("min-max", false).unwrap(),
            EstimatorArg::MinMax
        );
    }
}
