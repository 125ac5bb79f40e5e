//! Mean-shift iteration for a single point
//!
//! Each iteration replaces the working position with the kernel-weighted
//! centroid of the *original* input set:
//!
//! ```text
//! ibw    = estimator(x, X)
//! w_p    = kernel(metric(x, p) * ibw)          for every p in X
//! x'     = sum(w_p * p) / sum(w_p)
//! moved  = metric(x, x')
//! ```
//!
//! and stops once `moved <= epsilon` or `max_iter` steps have been taken.
//! Positions of other points being shifted never feed back into the
//! centroid, which is what makes points independent of each other and of
//! the order they are processed in.

use crate::params::{DegenerateWeightPolicy, MeanShiftParams};
use crate::types::ShiftOutcome;
use msc_core::{BandwidthEstimator, Error, Kernel, Metric, PointAccessor, Result, Scalar};
use tracing::{trace, warn};

/// Borrowed view of everything needed to shift points of one input set
pub struct MeanShiftIterator<'a, T, P, M, K, E> {
    points: &'a [P],
    dim: usize,
    metric: &'a M,
    kernel: &'a K,
    estimator: &'a E,
    params: &'a MeanShiftParams,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T, P, M, K, E> MeanShiftIterator<'a, T, P, M, K, E>
where
    T: Scalar,
    P: PointAccessor<T>,
    M: Metric,
    K: Kernel,
    E: BandwidthEstimator,
{
    /// Create an iterator over `points`.
    ///
    /// `points` must already have passed
    /// [`validate_points`](msc_core::validate_points) for `dim`.
    pub fn new(
        points: &'a [P],
        dim: usize,
        metric: &'a M,
        kernel: &'a K,
        estimator: &'a E,
        params: &'a MeanShiftParams,
    ) -> Self {
        Self {
            points,
            dim,
            metric,
            kernel,
            estimator,
            params,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Weighted centroid of the input set around `query`.
    ///
    /// Writes the centroid into `out` and returns the total weight. `out` is
    /// left untouched when the total weight is zero or not finite.
    fn centroid(&self, query: &[T], ibw: f64, numerator: &mut [f64], out: &mut [T]) -> f64 {
        numerator.fill(0.0);
        let mut total_weight = 0.0;

        for point in self.points {
            let coords = point.view(self.dim);
            let weight = self.kernel.weight(self.metric.distance(query, coords) * ibw);
            for (acc, &x) in numerator.iter_mut().zip(coords) {
                *acc += weight * x.to_f64();
            }
            total_weight += weight;
        }

        if total_weight != 0.0 && total_weight.is_finite() {
            for (dst, &acc) in out.iter_mut().zip(numerator.iter()) {
                *dst = T::from_f64(acc / total_weight);
            }
        }
        total_weight
    }

    /// Shift the point at `index` until it converges.
    ///
    /// Returns [`Error::DegenerateWeight`] only under
    /// [`DegenerateWeightPolicy::Fail`]; under `Freeze` the outcome is
    /// flagged `degenerate` instead.
    pub fn shift_point(&self, index: usize) -> Result<ShiftOutcome<T>> {
        let dim = self.dim;
        let mut current: Vec<T> = self.points[index].view(dim).to_vec();
        let mut next = vec![T::zero(); dim];
        let mut numerator = vec![0.0f64; dim];

        let adaptive = self.estimator.is_adaptive();
        let mut ibw = if adaptive {
            0.0
        } else {
            self.estimator
                .inverse_bandwidth(&current, self.points, dim, self.metric)
        };

        let mut iterations = 0;
        let mut converged = false;
        let mut degenerate = false;

        while iterations < self.params.max_iter {
            iterations += 1;
            if adaptive {
                ibw = self
                    .estimator
                    .inverse_bandwidth(&current, self.points, dim, self.metric);
            }

            let total_weight = self.centroid(&current, ibw, &mut numerator, &mut next);
            let finite = total_weight != 0.0
                && total_weight.is_finite()
                && next.iter().all(|x| x.is_finite());
            if !finite {
                match self.params.degenerate_policy {
                    DegenerateWeightPolicy::Fail => {
                        warn!(index, iterations, total_weight, "degenerate weight, dropping point");
                        return Err(Error::DegenerateWeight {
                            index,
                            iteration: iterations,
                        });
                    }
                    DegenerateWeightPolicy::Freeze => {
                        warn!(index, iterations, total_weight, "degenerate weight, freezing point");
                        degenerate = true;
                        break;
                    }
                }
            }

            let movement = self.metric.distance(&current, &next);
            std::mem::swap(&mut current, &mut next);
            if !(movement > self.params.epsilon) {
                converged = true;
                break;
            }
        }

        if converged {
            trace!(index, iterations, "point converged");
        } else if !degenerate {
            warn!(index, iterations, "point reached max_iter before converging");
        }

        Ok(ShiftOutcome {
            index,
            position: current,
            iterations,
            converged,
            degenerate,
        })
    }
}
