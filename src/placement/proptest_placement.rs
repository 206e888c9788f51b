//! Property-based tests for scene placement using proptest.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::test_utils::fixtures::normalized;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// No scattered point lies inside the exclusion cube.
    #[test]
    fn prop_scatter_avoids_origin(
        seed in any::<u64>(),
        spread in 1.0f32..200.0,
        offset_fraction in 0.0f32..0.45,
    ) {
        let scatter = Scatter {
            count: 64,
            spread,
            min_offset: spread * offset_fraction,
        };
        let points = scatter.points(&mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(points.len(), 64);

        let half = spread / 2.0;
        for p in points {
            prop_assert!(!scatter.too_close(p), "{:?} inside band {}", p, scatter.min_offset);
            prop_assert!(p.abs().max_element() <= half);
        }
    }

    /// Any offset at or beyond half the spread is refused.
    #[test]
    fn prop_scatter_infeasible_rejected(
        spread in 0.1f32..100.0,
        excess in 0.0f32..10.0,
    ) {
        let scatter = Scatter {
            count: 1,
            spread,
            min_offset: spread / 2.0 + excess,
        };
        let result = scatter.points(&mut StdRng::seed_from_u64(0));
        prop_assert!(matches!(result, Err(PlacementError::Configuration(_))));
    }

    /// Signs alternate -,+,-,+ and magnitudes equal metric / divisor.
    #[test]
    fn prop_linear_alternates(
        distances in prop::collection::vec(0.01f64..400.0, 1..12),
        divisor in 0.5f64..50.0,
    ) {
        let objects: Vec<_> = distances
            .iter()
            .enumerate()
            .map(|(i, d)| normalized(&format!("n{i}"), i as i64, &d.to_string()))
            .collect();
        let mode = PlacementMode::LinearByMetric {
            metric: Metric::LunarDistance,
            divisor,
            axis: Axis::Y,
        };
        let placed = place_objects(&objects, &mode, &mut StdRng::seed_from_u64(0)).unwrap();

        for (i, p) in placed.iter().enumerate() {
            let expected = (distances[i] / divisor) as f32;
            prop_assert_eq!(p.position.y.signum(), if i % 2 == 1 { 1.0 } else { -1.0 });
            prop_assert!((p.position.y.abs() - expected).abs() <= expected * 1e-5);
            prop_assert_eq!(p.position.x, 0.0);
            prop_assert_eq!(p.position.z, 0.0);
        }
    }
}
