//! Test utilities for feed, normalization and placement tests.
//!
//! Provides compact constructors for feed objects so tests read as tables of
//! `(epoch, lunar distance)` pairs.

/// Fixtures for building feed data.
pub mod fixtures {
    use crate::feed::source::{FeedError, FeedSource, PageResponse};
    use crate::feed::{
        CloseApproach, DiameterRange, EstimatedDiameter, FeedLinks, MissDistance, RawFeed,
        RawObject,
    };
    use crate::normalize::NormalizedObject;

    /// Close approach at `epoch` ms with the given lunar distance string.
    pub fn approach(epoch: i64, lunar: &str) -> CloseApproach {
        CloseApproach {
            epoch_date_close_approach: epoch,
            miss_distance: MissDistance {
                lunar: lunar.to_string(),
                kilometers: lunar
                    .parse::<f64>()
                    .ok()
                    .map(|ld| format!("{:.3}", ld * 384_400.0)),
                ..Default::default()
            },
            close_approach_date: None,
            orbiting_body: Some("Earth".to_string()),
            relative_velocity: None,
        }
    }

    /// Feed object with one close approach per `(epoch, lunar)` pair.
    pub fn object(id: &str, approaches: &[(i64, &str)]) -> RawObject {
        RawObject {
            id: id.to_string(),
            name: format!("({id})"),
            neo_reference_id: Some(id.to_string()),
            nasa_jpl_url: None,
            absolute_magnitude_h: Some(22.1),
            is_potentially_hazardous_asteroid: false,
            estimated_diameter: EstimatedDiameter {
                kilometers: DiameterRange {
                    estimated_diameter_min: 0.1,
                    estimated_diameter_max: 0.25,
                },
                meters: None,
            },
            close_approach_data: approaches
                .iter()
                .map(|&(epoch, lunar)| approach(epoch, lunar))
                .collect(),
        }
    }

    /// Normalized object with a single approach.
    pub fn normalized(id: &str, epoch: i64, lunar: &str) -> NormalizedObject {
        NormalizedObject::try_from(object(id, &[(epoch, lunar)]))
            .expect("fixture has an approach")
    }

    /// Single-day feed page with a `next` link.
    pub fn feed_page(date: &str, objects: Vec<RawObject>) -> RawFeed {
        let mut feed = RawFeed {
            links: FeedLinks {
                next: Some(format!("https://feed.test/feed?start_date={date}&next=1")),
                prev: None,
                self_link: Some(format!("https://feed.test/feed?start_date={date}")),
            },
            element_count: objects.len() as u64,
            ..Default::default()
        };
        feed.near_earth_objects.insert(date.to_string(), objects);
        feed
    }

    /// Feed source returning canned responses for the two pages.
    pub struct ScriptedFeedSource {
        pub first: PageResponse,
        pub next: PageResponse,
    }

    impl ScriptedFeedSource {
        pub fn two_days(first: RawFeed, next: RawFeed) -> Self {
            Self {
                first: PageResponse::Feed(first),
                next: PageResponse::Feed(next),
            }
        }
    }

    impl FeedSource for ScriptedFeedSource {
        fn first_page(&self) -> Result<PageResponse, FeedError> {
            Ok(self.first.clone())
        }

        fn page(&self, _url: &str) -> Result<PageResponse, FeedError> {
            Ok(self.next.clone())
        }
    }
}
