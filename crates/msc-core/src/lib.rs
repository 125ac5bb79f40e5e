//! Core policies and types for mean-shift clustering
//!
//! This crate holds the leaf components the clustering engine is generic
//! over. Every policy is resolved at compile time; nothing is dispatched on
//! runtime type information.
//!
//! - [`PointAccessor`]: exposes an arbitrary point representation as a run
//!   of `dim` coordinates
//! - [`Metric`]: dissimilarity between two coordinate views
//! - [`Kernel`]: weighting profile over normalised distances
//! - [`BandwidthEstimator`]: inverse bandwidth, fixed or adaptive
//!
//! # Example
//!
//! ```rust
//! use msc_core::prelude::*;
//!
//! let a = [0.0, 0.0, 0.0];
//! let b = [0.0, 0.0, 1.0];
//! let points = vec![a, b];
//!
//! let est = Constant::new(3.0).unwrap();
//! let ibw = est.inverse_bandwidth(&a, &points, 3, &L2Sq);
//! let w = ParabolicSq.weight(L2Sq.distance(&a, &b) * ibw);
//! assert!((w - 2.0 / 3.0).abs() < 1e-12);
//! ```

pub mod accessor;
pub mod error;
pub mod estimators;
pub mod kernels;
pub mod metrics;
pub mod numeric;

// Re-export core types
pub use error::{Error, Result};

pub use accessor::{pod_coords, validate_points, PointAccessor};
pub use estimators::{BandwidthEstimator, Constant, MinMaxDistance};
pub use kernels::{Kernel, Support};
pub use metrics::{DistanceScale, Metric};
pub use numeric::{Scalar, DEFAULT_EPSILON};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check that a kernel consumes the distance scale a metric produces
pub fn check_pairing<K: Kernel, M: Metric>(kernel: &K, metric: &M) -> Result<()> {
    if kernel.input() == metric.scale() {
        Ok(())
    } else {
        Err(Error::kernel_metric_mismatch(
            kernel.name(),
            kernel.input(),
            metric.name(),
            metric.scale(),
        ))
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BandwidthEstimator, Constant, DistanceScale, Kernel, Metric, MinMaxDistance,
        PointAccessor, Result, Scalar, Support,
    };

    pub use crate::error::Error;

    pub use crate::kernels::{
        Biweight, BiweightSq, Cosine, Gaussian, GaussianSq, Logistic, Parabolic, ParabolicSq,
        Sigmoid, Silverman, Triangular, Tricube, TricubeCu, Triweight, TriweightSq, Uniform,
    };
    pub use crate::metrics::{Chebyshev, Inf, L2Cu, Manhattan, L1, L2, L2Sq};
}
