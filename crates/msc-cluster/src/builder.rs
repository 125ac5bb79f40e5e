use crate::clusterer::MeanShift;
use crate::execution::{ExecutionEngine, SequentialEngine};
use crate::params::{DegenerateWeightPolicy, MeanShiftParams};
use msc_core::kernels::ParabolicSq;
use msc_core::metrics::L2Sq;
use msc_core::{check_pairing, BandwidthEstimator, Constant, Kernel, Metric, Result};

/// Builder for configuring and creating mean-shift clusterers.
///
/// The metric, kernel and estimator are fixed at construction; everything
/// else has a default taken from [`MeanShiftParams::default`].
#[derive(Debug, Clone)]
pub struct MeanShiftBuilder<M, K, E, X = SequentialEngine> {
    metric: M,
    kernel: K,
    estimator: E,
    engine: X,
    params: MeanShiftParams,
}

impl<M, K, E> MeanShiftBuilder<M, K, E>
where
    M: Metric,
    K: Kernel,
    E: BandwidthEstimator,
{
    /// Creates a new builder running on the calling thread.
    ///
    /// # Arguments
    /// * `metric` - Distance between coordinate views
    /// * `kernel` - Weighting profile; must accept the metric's distance scale
    /// * `estimator` - Inverse bandwidth policy
    pub fn new(metric: M, kernel: K, estimator: E) -> Self {
        Self {
            metric,
            kernel,
            estimator,
            engine: SequentialEngine,
            params: MeanShiftParams::default(),
        }
    }
}

impl<M, K, E, X> MeanShiftBuilder<M, K, E, X>
where
    M: Metric,
    K: Kernel,
    E: BandwidthEstimator,
    X: ExecutionEngine,
{
    /// Sets the convergence tolerance.
    ///
    /// Also used for mode matching unless [`cluster_epsilon`](Self::cluster_epsilon)
    /// is set.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.params.epsilon = epsilon;
        self
    }

    /// Sets the iteration cap per point
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.params.max_iter = max_iter;
        self
    }

    /// Sets the handling of vanishing total weight
    pub fn degenerate_policy(mut self, policy: DegenerateWeightPolicy) -> Self {
        self.params.degenerate_policy = policy;
        self
    }

    /// Sets a separate tolerance for matching shifted points to modes
    pub fn cluster_epsilon(mut self, epsilon: f64) -> Self {
        self.params.cluster_epsilon = Some(epsilon);
        self
    }

    /// Replaces all parameters at once
    pub fn params(mut self, params: MeanShiftParams) -> Self {
        self.params = params;
        self
    }

    /// Runs the shifting phase on `engine`
    pub fn engine<X2: ExecutionEngine>(self, engine: X2) -> MeanShiftBuilder<M, K, E, X2> {
        MeanShiftBuilder {
            metric: self.metric,
            kernel: self.kernel,
            estimator: self.estimator,
            engine,
            params: self.params,
        }
    }

    /// Builds the configured clusterer.
    ///
    /// Fails when the kernel expects a different distance scale than the
    /// metric produces, or when a parameter is out of range.
    pub fn build(self) -> Result<MeanShift<M, K, E, X>> {
        check_pairing(&self.kernel, &self.metric)?;
        self.params.validate()?;

        Ok(MeanShift::from_parts(
            self.metric,
            self.kernel,
            self.estimator,
            self.engine,
            self.params,
        ))
    }
}

/// Convenience function for the common squared-Euclidean setup.
///
/// `bandwidth` is in squared distance units, as consumed by [`ParabolicSq`].
pub fn default_clusterer(bandwidth: f64) -> Result<MeanShift<L2Sq, ParabolicSq, Constant>> {
    MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(bandwidth)?).build()
}

/// Convenience function for the squared-Euclidean setup with custom tolerances
pub fn clusterer_with_params(
    bandwidth: f64,
    epsilon: f64,
    max_iter: usize,
) -> Result<MeanShift<L2Sq, ParabolicSq, Constant>> {
    MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(bandwidth)?)
        .epsilon(epsilon)
        .max_iter(max_iter)
        .build()
}
