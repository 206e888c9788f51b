//! Common test utilities for integration tests.

#![allow(dead_code)]

use neowatch::feed::source::PageResponse;
use neowatch::feed::{FeedError, FeedSource, RawFeed};

/// Epoch of the first approach in [`two_day_feed`], 2024-03-01 12:00 UTC.
pub const DAY_ONE_NOON_MS: i64 = 1_709_294_400_000;

/// One feed object as NeoWs serializes it.
pub fn object_json(id: &str, hazardous: bool, approaches: &[(i64, &str)]) -> String {
    let approaches: Vec<String> = approaches
        .iter()
        .map(|(epoch, lunar)| {
            format!(
                r#"{{
                    "close_approach_date": "2024-03-01",
                    "epoch_date_close_approach": {epoch},
                    "relative_velocity": {{ "kilometers_per_second": "12.5" }},
                    "miss_distance": {{ "astronomical": "0.01", "lunar": "{lunar}", "kilometers": "1500000.5" }},
                    "orbiting_body": "Earth"
                }}"#
            )
        })
        .collect();

    format!(
        r#"{{
            "links": {{ "self": "http://api.nasa.gov/neo/rest/v1/neo/{id}" }},
            "id": "{id}",
            "neo_reference_id": "{id}",
            "name": "({id})",
            "absolute_magnitude_h": 24.3,
            "estimated_diameter": {{
                "kilometers": {{ "estimated_diameter_min": 0.1234, "estimated_diameter_max": 1.2 }}
            }},
            "is_potentially_hazardous_asteroid": {hazardous},
            "close_approach_data": [{}],
            "is_sentry_object": false
        }}"#,
        approaches.join(",")
    )
}

/// One feed page with a single date bucket.
pub fn page_json(date: &str, objects: &[String], next: Option<&str>) -> String {
    let next = next
        .map(|url| format!(r#""next": "{url}","#))
        .unwrap_or_default();
    format!(
        r#"{{
            "links": {{ {next} "self": "https://feed.test/feed?start_date={date}" }},
            "element_count": {},
            "near_earth_objects": {{ "{date}": [{}] }}
        }}"#,
        objects.len(),
        objects.join(",")
    )
}

pub fn page(date: &str, objects: &[String], next: Option<&str>) -> RawFeed {
    serde_json::from_str(&page_json(date, objects, next)).expect("valid page json")
}

/// Two consecutive daily pages.
///
/// `2465633` appears on both days; its day-two approach is the later one.
pub fn two_day_feed() -> (RawFeed, RawFeed) {
    let day_one = page(
        "2024-03-01",
        &[
            object_json("2465633", true, &[(DAY_ONE_NOON_MS, "117.77")]),
            object_json("3542519", false, &[(DAY_ONE_NOON_MS + 3_600_000, "95.0")]),
        ],
        Some("https://feed.test/feed?start_date=2024-03-02"),
    );
    let day_two = page(
        "2024-03-02",
        &[
            object_json("2465633", true, &[(DAY_ONE_NOON_MS + 86_400_000, "80.0")]),
            object_json("54016476", false, &[(DAY_ONE_NOON_MS - 3_600_000, "3.2")]),
        ],
        Some("https://feed.test/feed?start_date=2024-03-03"),
    );
    (day_one, day_two)
}

/// Feed source answering from memory.
pub struct StaticFeedSource {
    pub first: PageResponse,
    pub next: PageResponse,
}

impl StaticFeedSource {
    pub fn pages(first: RawFeed, next: RawFeed) -> Self {
        Self {
            first: PageResponse::Feed(first),
            next: PageResponse::Feed(next),
        }
    }

    /// Source whose first request returns the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            first: PageResponse::Unavailable { status },
            next: PageResponse::Unavailable { status },
        }
    }
}

impl FeedSource for StaticFeedSource {
    fn first_page(&self) -> Result<PageResponse, FeedError> {
        Ok(self.first.clone())
    }

    fn page(&self, _url: &str) -> Result<PageResponse, FeedError> {
        Ok(self.next.clone())
    }
}
