//! Generic mean-shift clustering
//!
//! Umbrella crate re-exporting the policy crate [`policies`] and the engine
//! crate [`cluster`].
//!
//! ```rust
//! use msc::prelude::*;
//!
//! let points = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0]];
//! let clusters = msc::cluster::cluster(
//!     &points,
//!     3,
//!     L2Sq,
//!     ParabolicSq,
//!     Constant::new(3.0).unwrap(),
//!     1e-7,
//!     usize::MAX,
//! )
//! .unwrap();
//!
//! assert_eq!(clusters.len(), 2);
//! ```

pub use msc_cluster as cluster;
pub use msc_core as policies;

/// Prelude module for convenient imports
pub mod prelude {
    pub use msc_cluster::prelude::*;
    pub use msc_core::prelude::*;
}
