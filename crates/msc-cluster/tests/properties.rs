//! Property-based tests for mean-shift clustering
//!
//! Shifting is independent per point, so results must not depend on input
//! order for well separated data, and repeated runs must agree exactly.

#[cfg(test)]
mod property_tests {
    use msc_cluster::test_data::{TestDistributions, TestParameters};
    use msc_cluster::*;
    use msc_core::prelude::*;
    use proptest::prelude::*;

    fn blob_clusterer() -> MeanShift<L2Sq, ParabolicSq, Constant> {
        MeanShiftBuilder::new(
            L2Sq,
            ParabolicSq,
            Constant::new(TestParameters::BLOB_BANDWIDTH).unwrap(),
        )
        .epsilon(1e-10)
        .cluster_epsilon(1e-4)
        .build()
        .unwrap()
    }

    fn sorted_modes(result: &ClusteringResult<f64>) -> Vec<Vec<f64>> {
        let mut modes: Vec<Vec<f64>> = result.clusters().iter().map(|c| c.mode().to_vec()).collect();
        modes.sort_by(|a, b| a[0].total_cmp(&b[0]));
        modes
    }

    fn point() -> impl Strategy<Value = [f64; 3]> {
        [-20.0..20.0f64, -20.0..20.0f64, -20.0..20.0f64]
    }

    proptest! {
        // Property: cluster count, modes and groupings survive any permutation
        #[test]
        fn prop_permutation_keeps_blob_clusters(
            perm in Just((0..50).collect::<Vec<usize>>()).prop_shuffle()
        ) {
            let points = TestDistributions::two_blobs_3d();
            let ms = blob_clusterer();
            let baseline = ms.cluster(&points, 3).unwrap();

            let permuted: Vec<[f64; 3]> = perm.iter().map(|&i| points[i]).collect();
            let result = ms.cluster(&permuted, 3).unwrap();

            prop_assert_eq!(result.cluster_count(), 2);
            for (a, b) in sorted_modes(&baseline).iter().zip(sorted_modes(&result).iter()) {
                for (x, y) in a.iter().zip(b.iter()) {
                    prop_assert!((x - y).abs() < 1e-2, "modes differ: {:?} vs {:?}", a, b);
                }
            }

            // Members of one cluster all come from the same blob
            for cluster in result.clusters() {
                let blob = perm[cluster.members()[0]] / 25;
                for &m in cluster.members() {
                    prop_assert_eq!(perm[m] / 25, blob);
                }
            }
        }

        // Property: identical points are already at their mode
        #[test]
        fn prop_identical_points_single_cluster(
            p in point(),
            n in 1usize..30,
            bandwidth in 0.1..10.0f64
        ) {
            let points = TestDistributions::identical_points(n, p);
            let result = default_clusterer(bandwidth).unwrap().cluster(&points, 3).unwrap();

            prop_assert_eq!(result.cluster_count(), 1);
            prop_assert_eq!(result.clusters()[0].len(), n);
            for outcome in result.outcomes() {
                prop_assert_eq!(outcome.iterations, 1);
                prop_assert!(outcome.converged);
            }
        }

        // Property: same input and policies give identical clusters
        #[test]
        fn prop_deterministic(
            points in prop::collection::vec(point(), 1..30),
            bandwidth in 0.5..5.0f64
        ) {
            let ms = MeanShiftBuilder::new(L2, Gaussian, Constant::new(bandwidth).unwrap())
                .epsilon(1e-9)
                .max_iter(200)
                .build()
                .unwrap();

            let a = ms.cluster(&points, 3).unwrap();
            let b = ms.cluster(&points, 3).unwrap();
            prop_assert_eq!(a.clusters(), b.clusters());
            prop_assert_eq!(a.cluster_count(), b.cluster_count());

            // Every point lands in exactly one cluster
            let labels = a.labels();
            prop_assert!(labels.iter().all(|l| l.is_some()));
            let total: usize = a.clusters().iter().map(|c| c.len()).sum();
            prop_assert_eq!(total, points.len());
        }

        // Property: every point is shifted, in input order, whatever the metric
        #[test]
        fn prop_shift_reports_every_point(
            points in prop::collection::vec(point(), 1..20)
        ) {
            let ms = MeanShiftBuilder::new(Manhattan, Triangular, Constant::new(5.0).unwrap())
                .max_iter(100)
                .build()
                .unwrap();
            let shifted = ms.shift(&points, 3).unwrap();

            prop_assert_eq!(shifted.len(), points.len());
            for (i, outcome) in shifted.iter().enumerate() {
                prop_assert_eq!(outcome.index, i);
                prop_assert!(outcome.iterations >= 1 && outcome.iterations <= 100);
                prop_assert!(outcome.position.iter().all(|x| x.is_finite()));
            }
        }
    }
}
