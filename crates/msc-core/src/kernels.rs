//! Kernel profiles
//!
//! A kernel maps a bandwidth-normalised distance to a non-negative weight that
//! does not increase with `|x|`. Compact kernels are exactly zero beyond 1
//! (the support test is inclusive: `x <= 1` is inside).
//!
//! The `Sq` and `Cu` kernels take the squared or cubed distance directly
//! and are distinct formulas, not "square then call the linear kernel". Each
//! kernel declares the [`DistanceScale`] it expects through
//! [`Kernel::input`], and the engine rejects a metric of any other scale.

use crate::metrics::DistanceScale;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

/// Support of a kernel profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Zero for every input beyond 1
    Compact,
    /// Positive everywhere
    Infinite,
}

/// Weighting profile applied to normalised distances
pub trait Kernel: Clone + Send + Sync {
    /// Weight for normalised input `x`
    fn weight(&self, x: f64) -> f64;

    /// Scale of distance this kernel expects
    fn input(&self) -> DistanceScale {
        DistanceScale::Linear
    }

    /// Whether the kernel vanishes beyond 1
    fn support(&self) -> Support;

    /// Name of this kernel for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! compact_kernel {
    ($(#[$doc:meta])* $name:ident, $input:ident, |$x:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Kernel for $name {
            #[inline]
            fn weight(&self, $x: f64) -> f64 {
                if $x <= 1.0 {
                    $body
                } else {
                    0.0
                }
            }

            fn input(&self) -> DistanceScale {
                DistanceScale::$input
            }

            fn support(&self) -> Support {
                Support::Compact
            }

            fn name(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

macro_rules! infinite_kernel {
    ($(#[$doc:meta])* $name:ident, $input:ident, |$x:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Kernel for $name {
            #[inline]
            fn weight(&self, $x: f64) -> f64 {
                $body
            }

            fn input(&self) -> DistanceScale {
                DistanceScale::$input
            }

            fn support(&self) -> Support {
                Support::Infinite
            }

            fn name(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

compact_kernel!(
    /// `1`
    Uniform, Linear, |_d| 1.0
);

compact_kernel!(
    /// `1 - |d|`
    Triangular, Linear, |d| 1.0 - d.abs()
);

compact_kernel!(
    /// Epanechnikov profile, `1 - d^2`
    Parabolic, Linear, |d| 1.0 - d * d
);

compact_kernel!(
    /// Epanechnikov profile on a squared distance, `1 - d2`
    ParabolicSq, Squared, |d2| 1.0 - d2
);

compact_kernel!(
    /// `(1 - d^2)^2`
    Biweight, Linear, |d| {
        let x = 1.0 - d * d;
        x * x
    }
);

compact_kernel!(
    /// `(1 - d2)^2`
    BiweightSq, Squared, |d2| {
        let x = 1.0 - d2;
        x * x
    }
);

compact_kernel!(
    /// `(1 - d^2)^3`
    Triweight, Linear, |d| {
        let x = 1.0 - d * d;
        x * x * x
    }
);

compact_kernel!(
    /// `(1 - d2)^3`
    TriweightSq, Squared, |d2| {
        let x = 1.0 - d2;
        x * x * x
    }
);

compact_kernel!(
    /// `(1 - d^3)^3`
    Tricube, Linear, |d| {
        let x = 1.0 - d * d * d;
        x * x * x
    }
);

compact_kernel!(
    /// `(1 - d3)^3`, on a cubed distance
    TricubeCu, Cubed, |d3| {
        let x = 1.0 - d3;
        x * x * x
    }
);

compact_kernel!(
    /// `cos(pi/2 * d)`
    Cosine, Linear, |d| (FRAC_PI_2 * d).cos()
);

infinite_kernel!(
    /// `exp(-d^2 / 2)`
    Gaussian, Linear, |d| (-0.5 * d * d).exp()
);

infinite_kernel!(
    /// `exp(-d2 / 2)`
    GaussianSq, Squared, |d2| (-0.5 * d2).exp()
);

infinite_kernel!(
    /// `1 / (2 + e^d + e^-d)`, peak 1/4
    Logistic, Linear, |d| 1.0 / (2.0 + d.exp() + (-d).exp())
);

infinite_kernel!(
    /// `1 / (e^d + e^-d)`, peak 1/2
    Sigmoid, Linear, |d| 1.0 / (d.exp() + (-d).exp())
);

infinite_kernel!(
    /// `exp(-|d|/sqrt2) * sin(|d|/sqrt2 + pi/4)`, peak sqrt2/2
    Silverman, Linear, |d| {
        let x = FRAC_1_SQRT_2 * d.abs();
        (-x).exp() * (x + FRAC_PI_4).sin()
    }
);
