//! Engine configuration

use msc_core::{Error, Result, DEFAULT_EPSILON};

/// What to do with a point whose kernel-weighted total weight vanishes
///
/// This happens when a compact kernel finds no input point inside the
/// bandwidth, or an estimator yields a non-finite factor. The policy is
/// applied uniformly to every point of a call and never affects siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateWeightPolicy {
    /// Stop the point at its last finite position and keep clustering it
    #[default]
    Freeze,
    /// Drop the point from clustering and report it as a failure
    Fail,
}

/// Parameters shared by the shifting and clustering phases
#[derive(Debug, Clone, PartialEq)]
pub struct MeanShiftParams {
    /// Convergence tolerance on the per-iteration movement
    pub epsilon: f64,
    /// Upper bound on iterations per point
    pub max_iter: usize,
    /// Handling of vanishing total weight
    pub degenerate_policy: DegenerateWeightPolicy,
    /// Clustering tolerance; `None` reuses `epsilon`
    pub cluster_epsilon: Option<f64>,
}

impl Default for MeanShiftParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iter: usize::MAX,
            degenerate_policy: DegenerateWeightPolicy::Freeze,
            cluster_epsilon: None,
        }
    }
}

impl MeanShiftParams {
    /// Tolerance used to match shifted points against cluster modes
    pub fn cluster_tolerance(&self) -> f64 {
        self.cluster_epsilon.unwrap_or(self.epsilon)
    }

    /// Validate all parameters
    pub fn validate(&self) -> Result<()> {
        check_tolerance("epsilon", self.epsilon)?;
        if let Some(tol) = self.cluster_epsilon {
            check_tolerance("cluster epsilon", tol)?;
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_tolerance(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{what} {value} must be finite and non-negative"
        )))
    }
}
