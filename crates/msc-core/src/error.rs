//! Error types for mean-shift clustering
//!
//! Provides a unified error type for all msc crates.

use crate::metrics::DistanceScale;
use thiserror::Error;

/// Core error type for mean-shift operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration detected before any processing begins
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid parameter provided to a constructor
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A point exposes fewer coordinates than the requested dimension
    #[error("Dimension mismatch at point {index}: expected at least {expected} coordinates, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Kernel-weighted total weight vanished while shifting a point
    #[error("Degenerate weight at point {index}: total kernel weight is zero at iteration {iteration}")]
    DegenerateWeight { index: usize, iteration: usize },

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a zero dimension
    pub fn zero_dimension() -> Self {
        Self::Configuration("dimension must be a positive integer".to_string())
    }

    /// Create an error for a kernel paired with an incompatible metric
    pub fn kernel_metric_mismatch(
        kernel: &str,
        kernel_input: DistanceScale,
        metric: &str,
        metric_scale: DistanceScale,
    ) -> Self {
        Self::Configuration(format!(
            "kernel {kernel} expects {kernel_input} distances but metric {metric} produces {metric_scale} distances"
        ))
    }

    /// Create an error for a bandwidth that is not a positive finite number
    pub fn invalid_bandwidth(h: f64) -> Self {
        Self::InvalidParameter(format!("bandwidth {h} must be positive and finite"))
    }

    /// Whether this error aborts the whole call rather than a single point
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::InvalidParameter(_) | Self::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration("no accessor".to_string());
        assert_eq!(err.to_string(), "Configuration error: no accessor");

        let err = Error::InvalidParameter("epsilon must be finite".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: epsilon must be finite");

        let err = Error::DimensionMismatch { index: 4, expected: 3, actual: 2 };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch at point 4: expected at least 3 coordinates, got 2"
        );

        let err = Error::DegenerateWeight { index: 7, iteration: 1 };
        assert_eq!(
            err.to_string(),
            "Degenerate weight at point 7: total kernel weight is zero at iteration 1"
        );

        let err = Error::Execution("thread pool exhausted".to_string());
        assert_eq!(err.to_string(), "Execution error: thread pool exhausted");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::zero_dimension();
        assert!(err.to_string().contains("dimension"));
        assert!(err.is_configuration());

        let err = Error::kernel_metric_mismatch(
            "ParabolicSq",
            DistanceScale::Squared,
            "L2",
            DistanceScale::Linear,
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: kernel ParabolicSq expects squared distances but metric L2 produces linear distances"
        );

        let err = Error::invalid_bandwidth(-1.0);
        assert_eq!(err.to_string(), "Invalid parameter: bandwidth -1 must be positive and finite");
    }

    #[test]
    fn test_error_scope() {
        assert!(Error::DimensionMismatch { index: 0, expected: 1, actual: 0 }.is_configuration());
        assert!(!Error::DegenerateWeight { index: 0, iteration: 1 }.is_configuration());
        assert!(!Error::Execution("x".to_string()).is_configuration());
    }

    #[test]
    fn test_error_is_thread_safe() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<Error>();
    }
}
