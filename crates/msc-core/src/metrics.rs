//! Distance measures between coordinate views
//!
//! A metric only has to measure dissimilarity. It need not be a true metric
//! in the mathematical sense. [`L1`] and [`Inf`] sum or maximise *signed*
//! component differences, which is the long-standing behaviour of this
//! library; [`Manhattan`] and [`Chebyshev`] are the absolute-value norms.
//!
//! Every metric reports the [`DistanceScale`] it produces so the engine can
//! refuse to pair it with a kernel expecting a different scale.

use crate::Scalar;
use std::fmt;

/// Power of the underlying distance a metric returns or a kernel consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceScale {
    /// `d`
    Linear,
    /// `d^2`
    Squared,
    /// `d^3`
    Cubed,
}

impl fmt::Display for DistanceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Squared => write!(f, "squared"),
            Self::Cubed => write!(f, "cubed"),
        }
    }
}

/// Dissimilarity between two coordinate views of equal length
pub trait Metric: Clone + Send + Sync {
    /// Distance between `a` and `b`
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64;

    /// Scale of the value returned by [`Metric::distance`]
    fn scale(&self) -> DistanceScale {
        DistanceScale::Linear
    }

    /// Name of this metric for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[inline(always)]
fn sum_squares<T: Scalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| {
        let t = x - y;
        acc + t * t
    })
}

/// Sum of signed component differences (no absolute value)
#[derive(Debug, Clone, Copy, Default)]
pub struct L1;

impl Metric for L1 {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y))
            .to_f64()
    }

    fn name(&self) -> &'static str {
        "L1"
    }
}

/// Euclidean distance
#[derive(Debug, Clone, Copy, Default)]
pub struct L2;

impl Metric for L2 {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        sum_squares(a, b).sqrt().to_f64()
    }

    fn name(&self) -> &'static str {
        "L2"
    }
}

/// Squared Euclidean distance.
///
/// Avoids a square root per comparison; pair it with a squared-input kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct L2Sq;

impl Metric for L2Sq {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        sum_squares(a, b).to_f64()
    }

    fn scale(&self) -> DistanceScale {
        DistanceScale::Squared
    }

    fn name(&self) -> &'static str {
        "L2Sq"
    }
}

/// Cubed Euclidean distance, the input scale of [`crate::kernels::TricubeCu`]
#[derive(Debug, Clone, Copy, Default)]
pub struct L2Cu;

impl Metric for L2Cu {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        let d2 = sum_squares(a, b).to_f64();
        d2 * d2.sqrt()
    }

    fn scale(&self) -> DistanceScale {
        DistanceScale::Cubed
    }

    fn name(&self) -> &'static str {
        "L2Cu"
    }
}

/// Running maximum of signed component differences (no absolute value)
#[derive(Debug, Clone, Copy, Default)]
pub struct Inf;

impl Metric for Inf {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| {
                let t = x - y;
                if acc < t {
                    t
                } else {
                    acc
                }
            })
            .to_f64()
    }

    fn name(&self) -> &'static str {
        "Inf"
    }
}

/// Sum of absolute component differences
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Metric for Manhattan {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y).abs())
            .to_f64()
    }

    fn name(&self) -> &'static str {
        "Manhattan"
    }
}

/// Largest absolute component difference
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl Metric for Chebyshev {
    #[inline]
    fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> f64 {
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| acc.max((x - y).abs()))
            .to_f64()
    }

    fn name(&self) -> &'static str {
        "Chebyshev"
    }
}
