//! NeoWs feed model.
//!
//! Mirrors the JSON shape of the NASA near-Earth-object daily feed. Only the
//! fields the viewer reads are modelled; everything else in the payload is
//! ignored by serde.

pub mod loader;
pub mod source;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use loader::{FeedLoaderPlugin, FeedSourceHandle, FeedState};
pub use source::{FeedError, FeedSource, FileFeedSource, HttpFeedSource};

/// A numeric field of the feed that could not be parsed.
///
/// The feed transmits distances and velocities as strings.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("invalid number in `{field}`: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Parse a stringified float from the feed.
pub fn parse_quantity(field: &'static str, value: &str) -> Result<f64, FormatError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormatError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Raw feed document as returned by `/feed`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeed {
    pub links: FeedLinks,
    pub element_count: u64,
    /// Objects bucketed by `YYYY-MM-DD` date key.
    ///
    /// A `BTreeMap` iterates the buckets in chronological order.
    pub near_earth_objects: BTreeMap<String, Vec<RawObject>>,
}

impl RawFeed {
    /// Merge the following page into this one.
    ///
    /// Keeps this page's links, sums the element counts and unions the date
    /// buckets. On a key collision the later page wins.
    pub fn merge(mut self, next: RawFeed) -> RawFeed {
        self.element_count += next.element_count;
        self.near_earth_objects.extend(next.near_earth_objects);
        self
    }

    /// Iterate every object of every bucket, in bucket order.
    pub fn objects(&self) -> impl Iterator<Item = &RawObject> {
        self.near_earth_objects.values().flatten()
    }
}

/// Pagination links of a feed page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// One near-Earth object as listed under a date bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawObject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neo_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasa_jpl_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<f64>,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: EstimatedDiameter,
    /// One record per date bucket the object appears under.
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

/// Estimated diameter ranges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters: Option<DiameterRange>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// A single recorded pass near Earth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Time of closest approach, Unix milliseconds.
    pub epoch_date_close_approach: i64,
    pub miss_distance: MissDistance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbiting_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_velocity: Option<RelativeVelocity>,
}

/// Miss distance in several units, each transmitted as a string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    pub lunar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astronomical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles: Option<String>,
}

impl MissDistance {
    /// Miss distance in lunar distances.
    pub fn lunar(&self) -> Result<f64, FormatError> {
        parse_quantity("miss_distance.lunar", &self.lunar)
    }

    /// Miss distance in kilometers.
    pub fn kilometers(&self) -> Result<f64, FormatError> {
        let raw = self.kilometers.as_deref().unwrap_or_default();
        parse_quantity("miss_distance.kilometers", raw)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers_per_second: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers_per_hour: Option<String>,
}
