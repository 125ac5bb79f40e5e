//! Bandwidth estimators
//!
//! An estimator returns an *inverse* bandwidth: the factor multiplied into a
//! raw distance before it reaches the kernel. It is queried with the current
//! position of the point being shifted and the frozen input set.

use crate::accessor::PointAccessor;
use crate::metrics::Metric;
use crate::{Error, Result, Scalar};

/// Policy producing the inverse-bandwidth scale for a query point
pub trait BandwidthEstimator: Clone + Send + Sync {
    /// Inverse bandwidth at `query` given the whole input set
    fn inverse_bandwidth<T, P, M>(&self, query: &[T], dataset: &[P], dim: usize, metric: &M) -> f64
    where
        T: Scalar,
        P: PointAccessor<T>,
        M: Metric;

    /// Whether the result depends on the query position.
    ///
    /// Non-adaptive estimators are evaluated once per point instead of once
    /// per iteration.
    fn is_adaptive(&self) -> bool;

    /// Name of this estimator for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

fn check_bandwidth(h: f64) -> Result<()> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_bandwidth(h))
    }
}

/// Fixed bandwidth `h`, returning `1/h` for every query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    inverse: f64,
}

impl Constant {
    /// Create a constant estimator for bandwidth `h`
    pub fn new(h: f64) -> Result<Self> {
        check_bandwidth(h)?;
        Ok(Self { inverse: 1.0 / h })
    }

    /// The bandwidth this estimator was built with
    pub fn bandwidth(&self) -> f64 {
        1.0 / self.inverse
    }
}

impl BandwidthEstimator for Constant {
    #[inline]
    fn inverse_bandwidth<T, P, M>(&self, _query: &[T], _dataset: &[P], _dim: usize, _metric: &M) -> f64
    where
        T: Scalar,
        P: PointAccessor<T>,
        M: Metric,
    {
        self.inverse
    }

    fn is_adaptive(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "Constant"
    }
}

/// Adaptive bandwidth from the spread of distances around the query.
///
/// Returns `(dmax / dmin)^p / h^2`, where `dmin` and `dmax` are the smallest
/// and largest *nonzero* distances from the query to any input point. When
/// every input point coincides with the query the ratio is taken as 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxDistance {
    inverse_h2: f64,
    power: f64,
}

impl MinMaxDistance {
    /// Create an estimator for bandwidth `h` and exponent `p`
    pub fn new(h: f64, p: f64) -> Result<Self> {
        check_bandwidth(h)?;
        if !p.is_finite() {
            return Err(Error::InvalidParameter(format!("exponent {p} must be finite")));
        }
        Ok(Self {
            inverse_h2: 1.0 / (h * h),
            power: p,
        })
    }

    /// Single-parameter form whose exponent is `1/h^2`
    pub fn from_bandwidth(h: f64) -> Result<Self> {
        check_bandwidth(h)?;
        Self::new(h, 1.0 / (h * h))
    }

    /// Exponent applied to the distance ratio
    pub fn power(&self) -> f64 {
        self.power
    }
}

impl BandwidthEstimator for MinMaxDistance {
    fn inverse_bandwidth<T, P, M>(&self, query: &[T], dataset: &[P], dim: usize, metric: &M) -> f64
    where
        T: Scalar,
        P: PointAccessor<T>,
        M: Metric,
    {
        let mut dmin = 0.0f64;
        let mut dmax = 0.0f64;
        for point in dataset {
            let d = metric.distance(point.view(dim), query);
            if d > 0.0 {
                if d < dmin || dmin == 0.0 {
                    dmin = d;
                }
                if d > dmax {
                    dmax = d;
                }
            }
        }

        let ratio = if dmin > 0.0 { dmax / dmin } else { 1.0 };
        ratio.powf(self.power) * self.inverse_h2
    }

    fn is_adaptive(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "MinMaxDistance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{L2, L2Sq};
    use approx::assert_relative_eq;

    #[test]
    fn test_constant() {
        let est = Constant::new(4.0).unwrap();
        let data = vec![vec![0.0, 0.0], vec![100.0, 100.0]];
        assert_eq!(est.inverse_bandwidth(&[1.0, 1.0], &data, 2, &L2), 0.25);
        assert_eq!(est.inverse_bandwidth(&[50.0, 7.0], &data, 2, &L2Sq), 0.25);
        assert_eq!(est.bandwidth(), 4.0);
        assert!(!est.is_adaptive());
    }

    #[test]
    fn test_invalid_bandwidths() {
        for h in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(Constant::new(h), Err(Error::InvalidParameter(_))));
            assert!(MinMaxDistance::new(h, 1.0).is_err());
            assert!(MinMaxDistance::from_bandwidth(h).is_err());
        }
        assert!(MinMaxDistance::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_min_max_distance() {
        let est = MinMaxDistance::new(2.0, 1.0).unwrap();
        // Distances from the query at the origin: 0 (skipped), 1, 4
        let data = vec![[0.0], [1.0], [4.0]];
        let ibw = est.inverse_bandwidth(&[0.0], &data, 1, &L2);
        assert_relative_eq!(ibw, 4.0 / 4.0);

        let est = MinMaxDistance::new(2.0, 2.0).unwrap();
        let ibw = est.inverse_bandwidth(&[0.0], &data, 1, &L2);
        assert_relative_eq!(ibw, 16.0 / 4.0);
        assert!(est.is_adaptive());
    }

    #[test]
    fn test_min_max_distance_tracks_query() {
        let est = MinMaxDistance::new(1.0, 1.0).unwrap();
        let data = vec![[0.0], [1.0], [3.0]];
        // From 0: dmin 1, dmax 3; from 1: dmin 1, dmax 2
        assert_relative_eq!(est.inverse_bandwidth(&[0.0], &data, 1, &L2), 3.0);
        assert_relative_eq!(est.inverse_bandwidth(&[1.0], &data, 1, &L2), 2.0);
    }

    #[test]
    fn test_min_max_distance_all_coincident() {
        let est = MinMaxDistance::new(2.0, 3.0).unwrap();
        let data = vec![[5.0, 5.0]; 4];
        let ibw = est.inverse_bandwidth(&[5.0, 5.0], &data, 2, &L2Sq);
        assert_eq!(ibw, 0.25);
        assert!(ibw.is_finite());
    }

    #[test]
    fn test_from_bandwidth_exponent() {
        let est = MinMaxDistance::from_bandwidth(2.0).unwrap();
        assert_eq!(est.power(), 0.25);
    }
}
