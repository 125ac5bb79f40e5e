//! Test data generators for mean-shift clustering
//!
//! Seeded synthetic point sets shared by unit tests, integration tests and
//! benchmarks so that every run sees the same input.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Standard test point sets
pub struct TestDistributions;

impl TestDistributions {
    /// Two close points and one far outlier in 3-D.
    ///
    /// With squared Euclidean distance, a parabolic kernel and bandwidth 3
    /// the first two share a mode near `(0, 0, 0.5)`.
    pub fn pair_and_outlier() -> Vec<[f64; 3]> {
        vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0]]
    }

    /// `n` copies of the same point
    pub fn identical_points(n: usize, point: [f64; 3]) -> Vec<[f64; 3]> {
        vec![point; n]
    }

    /// Gaussian blobs around `centers`, `n_per_blob` points each.
    ///
    /// Points are grouped by blob in the order of `centers`.
    ///
    /// # Panics
    ///
    /// Panics if `spread` is negative or NaN.
    pub fn blobs(centers: &[[f64; 3]], n_per_blob: usize, spread: f64, seed: u64) -> Vec<[f64; 3]> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise = Normal::new(0.0, spread).unwrap();

        let mut data = Vec::with_capacity(centers.len() * n_per_blob);
        for center in centers {
            for _ in 0..n_per_blob {
                data.push([
                    center[0] + noise.sample(&mut rng),
                    center[1] + noise.sample(&mut rng),
                    center[2] + noise.sample(&mut rng),
                ]);
            }
        }
        data
    }

    /// Two well separated blobs near `(0, 0, 0)` and `(10, 10, 10)`.
    ///
    /// Returns 50 points: indices `0..25` from the first blob and `25..50`
    /// from the second, each with standard deviation 0.25 per axis.
    pub fn two_blobs_3d() -> Vec<[f64; 3]> {
        Self::blobs(&[[0.0, 0.0, 0.0], [10.0, 10.0, 10.0]], 25, 0.25, 42)
    }

    /// `n` points drawn uniformly from the cube `[0, side)^3`
    pub fn uniform_cube(n: usize, side: f64, seed: u64) -> Vec<[f64; 3]> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let uniform = Uniform::new(0.0, side);
        (0..n)
            .map(|_| {
                [
                    uniform.sample(&mut rng),
                    uniform.sample(&mut rng),
                    uniform.sample(&mut rng),
                ]
            })
            .collect()
    }
}

/// Standard parameter sets for testing
pub struct TestParameters;

impl TestParameters {
    /// Squared bandwidth that keeps each blob of [`TestDistributions::two_blobs_3d`]
    /// inside one kernel support and the two blobs apart
    pub const BLOB_BANDWIDTH: f64 = 4.0;

    /// Convergence tolerance used by the pair-and-outlier scenario
    pub const EPSILON: f64 = 1e-7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blobs_are_seeded() {
        assert_eq!(TestDistributions::two_blobs_3d(), TestDistributions::two_blobs_3d());
        assert_ne!(
            TestDistributions::blobs(&[[0.0; 3]], 5, 1.0, 1),
            TestDistributions::blobs(&[[0.0; 3]], 5, 1.0, 2)
        );
    }

    #[test]
    fn test_two_blobs_layout() {
        let data = TestDistributions::two_blobs_3d();
        assert_eq!(data.len(), 50);
        assert!(data[..25].iter().all(|p| p.iter().all(|x| x.abs() < 2.0)));
        assert!(data[25..].iter().all(|p| p.iter().all(|x| (x - 10.0).abs() < 2.0)));
    }

    #[test]
    fn test_uniform_cube_bounds() {
        let data = TestDistributions::uniform_cube(100, 5.0, 7);
        assert_eq!(data.len(), 100);
        assert!(data.iter().flatten().all(|&x| (0.0..5.0).contains(&x)));
    }

    #[test]
    #[should_panic]
    fn test_blobs_reject_negative_spread() {
        TestDistributions::blobs(&[[0.0; 3]], 5, -1.0, 1);
    }
}
