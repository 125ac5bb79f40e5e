//! Mean-shift clustering engine
//!
//! Every input point is shifted, independently of all others, towards the
//! local maximum of a kernel density estimate built from the frozen input
//! set. Points whose shifted positions agree within a tolerance are then
//! grouped into clusters.
//!
//! # Algorithm Overview
//!
//! 1. **Shifting**: each point is repeatedly replaced by the kernel-weighted
//!    centroid of the original input until it moves no more than `epsilon`
//!    or `max_iter` steps have been taken. Points never see each other's
//!    intermediate positions, so this phase may run in parallel.
//! 2. **Clustering**: a single pass in input order assigns each shifted
//!    point to the first existing cluster whose mode is within tolerance,
//!    or founds a new cluster.
//!
//! # Examples
//!
//! ```rust
//! use msc_cluster::MeanShiftBuilder;
//! use msc_core::prelude::*;
//!
//! let points = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0]];
//!
//! let clusterer = MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(3.0).unwrap())
//!     .epsilon(1e-7)
//!     .build()
//!     .unwrap();
//!
//! let result = clusterer.cluster(&points, 3).unwrap();
//! assert_eq!(result.cluster_count(), 2);
//! assert_eq!(result.clusters()[0].members(), &[0, 1]);
//! assert_eq!(result.clusters()[1].members(), &[2]);
//! ```

pub mod builder;
pub mod clusterer;
pub mod execution;
pub mod modes;
pub mod params;
pub mod shift;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data;

// Re-export main types
pub use builder::{clusterer_with_params, default_clusterer, MeanShiftBuilder};
pub use clusterer::{cluster, MeanShift};
pub use execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
pub use modes::{cluster_modes, ModeClusterer};
pub use params::{DegenerateWeightPolicy, MeanShiftParams};
pub use shift::MeanShiftIterator;
pub use types::{Cluster, ClusteringResult, ShiftOutcome};

#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cluster, cluster_modes, sequential, Cluster, ClusteringResult, DegenerateWeightPolicy,
        ExecutionEngine, MeanShift, MeanShiftBuilder, MeanShiftParams, SequentialEngine,
        ShiftOutcome,
    };

    #[cfg(feature = "parallel")]
    pub use crate::{parallel, ParallelEngine};
}
