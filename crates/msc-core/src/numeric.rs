//! Coordinate scalar trait
//!
//! Points are stored in whatever floating-point width the caller chooses.
//! Distances, kernel weights and bandwidth factors are always `f64`.

use bytemuck::Pod;
use num_traits::Float;
use std::fmt::{Debug, Display};

/// Floating-point type usable as a point coordinate
pub trait Scalar: Float + Pod + Debug + Display + Default + Send + Sync + 'static {
    /// Machine epsilon of this type, widened to `f64`
    const EPSILON_F64: f64;

    /// Widen to `f64`
    fn to_f64(self) -> f64;

    /// Narrow from `f64`, rounding to the nearest representable value
    fn from_f64(value: f64) -> Self;
}

impl Scalar for f64 {
    const EPSILON_F64: f64 = f64::EPSILON;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Scalar for f32 {
    const EPSILON_F64: f64 = f32::EPSILON as f64;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

/// Default convergence tolerance: single-precision machine epsilon,
/// applied whatever the working precision is
pub const DEFAULT_EPSILON: f64 = <f32 as Scalar>::EPSILON_F64;
