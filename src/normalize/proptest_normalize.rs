//! Property-based tests for feed normalization using proptest.

use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::feed::{DiameterRange, MissDistance};

fn approach_strategy() -> impl Strategy<Value = CloseApproach> {
    (0i64..1_000, 0.0f64..500.0).prop_map(|(epoch, lunar)| CloseApproach {
        epoch_date_close_approach: epoch,
        miss_distance: MissDistance {
            lunar: format!("{lunar:.4}"),
            ..Default::default()
        },
        close_approach_date: None,
        orbiting_body: Some("Earth".to_string()),
        relative_velocity: None,
    })
}

fn object_strategy() -> impl Strategy<Value = RawObject> {
    (
        "[A-F]",
        prop::collection::vec(approach_strategy(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(id, close_approach_data, hazardous)| RawObject {
            name: format!("({id})"),
            id,
            neo_reference_id: None,
            nasa_jpl_url: None,
            absolute_magnitude_h: None,
            is_potentially_hazardous_asteroid: hazardous,
            estimated_diameter: EstimatedDiameter {
                kilometers: DiameterRange {
                    estimated_diameter_min: 0.1,
                    estimated_diameter_max: 0.3,
                },
                meters: None,
            },
            close_approach_data,
        })
}

fn feed_strategy() -> impl Strategy<Value = RawFeed> {
    prop::collection::btree_map(
        "2024-03-0[1-9]",
        prop::collection::vec(object_strategy(), 0..6),
        0..4,
    )
    .prop_map(|near_earth_objects| RawFeed {
        element_count: near_earth_objects.values().map(|v| v.len() as u64).sum(),
        near_earth_objects,
        ..Default::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Each output object carries exactly the latest approach of some input
    /// object with the same id, and nothing is invented or lost.
    #[test]
    fn prop_primary_is_max_epoch(feed in feed_strategy()) {
        let flattened = flatten(&feed);
        let normalized = normalize(&feed, NormalizeOptions::default());

        let non_empty = flattened
            .iter()
            .filter(|o| !o.close_approach_data.is_empty())
            .count();
        prop_assert_eq!(normalized.len(), non_empty);

        for object in &normalized {
            let matched = flattened.iter().any(|raw| {
                raw.id == object.id
                    && raw.close_approach_data.contains(&object.close_approach)
                    && raw
                        .close_approach_data
                        .iter()
                        .all(|a| a.epoch_date_close_approach <= object.epoch_ms())
            });
            prop_assert!(matched, "no source object for {}", object.id);
        }
    }

    /// Adjacent pairs are ordered by epoch.
    #[test]
    fn prop_epoch_sorted(feed in feed_strategy()) {
        let normalized = normalize(&feed, NormalizeOptions::default());
        for pair in normalized.windows(2) {
            prop_assert!(pair[0].epoch_ms() <= pair[1].epoch_ms());
        }
    }

    /// Adjacent pairs are ordered by lunar distance in lunar mode.
    #[test]
    fn prop_lunar_sorted(feed in feed_strategy()) {
        let options = NormalizeOptions { sort_key: SortKey::LunarDistance, ..Default::default() };
        let normalized = normalize(&feed, options);
        for pair in normalized.windows(2) {
            let a = pair[0].close_approach.miss_distance.lunar().unwrap();
            let b = pair[1].close_approach.miss_distance.lunar().unwrap();
            prop_assert!(a <= b);
        }
    }

    /// Normalizing the reflattened output changes nothing.
    #[test]
    fn prop_idempotent(feed in feed_strategy(), lunar in any::<bool>(), dedup in any::<bool>()) {
        let options = NormalizeOptions {
            sort_key: if lunar { SortKey::LunarDistance } else { SortKey::Epoch },
            dedup_by_id: dedup,
        };
        let once = normalize(&feed, options);
        let twice = normalize_objects(
            once.iter().cloned().map(NormalizedObject::into_raw),
            options,
        );
        prop_assert_eq!(once, twice);
    }

    /// Dedup leaves unique ids, each at its overall latest approach.
    #[test]
    fn prop_dedup_unique_latest(feed in feed_strategy()) {
        let options = NormalizeOptions { dedup_by_id: true, ..Default::default() };
        let normalized = normalize(&feed, options);

        let mut seen = HashSet::new();
        for object in &normalized {
            prop_assert!(seen.insert(object.id.clone()), "duplicate id {}", object.id);
            let latest = feed
                .objects()
                .filter(|raw| raw.id == object.id)
                .flat_map(|raw| raw.close_approach_data.iter())
                .map(|a| a.epoch_date_close_approach)
                .max();
            prop_assert_eq!(latest, Some(object.epoch_ms()));
        }
    }
}
