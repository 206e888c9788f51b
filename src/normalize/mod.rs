//! Feed normalization.
//!
//! Turns the date-bucketed raw feed into a flat list holding one "primary"
//! close approach per object, sorted soonest (or nearest) first. Nothing is
//! fabricated: records are only selected and reordered.

#[cfg(test)]
mod proptest_normalize;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::feed::{CloseApproach, EstimatedDiameter, RawFeed, RawObject};

/// Ordering applied to the normalized list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Ascending close-approach time.
    #[default]
    Epoch,
    /// Ascending miss distance in lunar distances.
    LunarDistance,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "epoch" => Ok(SortKey::Epoch),
            "lunarDistance" => Ok(SortKey::LunarDistance),
            other => Err(format!(
                "unknown sort key `{other}` (expected `epoch` or `lunarDistance`)"
            )),
        }
    }
}

/// Options controlling [`normalize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub sort_key: SortKey,
    /// Collapse objects listed under several date buckets into one.
    pub dedup_by_id: bool,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("object {id} has no close-approach data")]
    MissingApproachData { id: String },
}

/// A feed object reduced to its primary close approach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedObject {
    pub id: String,
    pub name: String,
    pub neo_reference_id: Option<String>,
    pub nasa_jpl_url: Option<String>,
    pub absolute_magnitude_h: Option<f64>,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: EstimatedDiameter,
    pub close_approach: CloseApproach,
}

impl NormalizedObject {
    /// Close-approach time, Unix milliseconds.
    pub fn epoch_ms(&self) -> i64 {
        self.close_approach.epoch_date_close_approach
    }

    /// Turn back into a raw object with a single close approach.
    pub fn into_raw(self) -> RawObject {
        RawObject {
            id: self.id,
            name: self.name,
            neo_reference_id: self.neo_reference_id,
            nasa_jpl_url: self.nasa_jpl_url,
            absolute_magnitude_h: self.absolute_magnitude_h,
            is_potentially_hazardous_asteroid: self.is_potentially_hazardous_asteroid,
            estimated_diameter: self.estimated_diameter,
            close_approach_data: vec![self.close_approach],
        }
    }
}

impl TryFrom<RawObject> for NormalizedObject {
    type Error = NormalizeError;

    fn try_from(mut raw: RawObject) -> Result<Self, Self::Error> {
        let Some(index) = primary_index(&raw.close_approach_data) else {
            return Err(NormalizeError::MissingApproachData { id: raw.id });
        };
        let close_approach = raw.close_approach_data.swap_remove(index);

        Ok(Self {
            id: raw.id,
            name: raw.name,
            neo_reference_id: raw.neo_reference_id,
            nasa_jpl_url: raw.nasa_jpl_url,
            absolute_magnitude_h: raw.absolute_magnitude_h,
            is_potentially_hazardous_asteroid: raw.is_potentially_hazardous_asteroid,
            estimated_diameter: raw.estimated_diameter,
            close_approach,
        })
    }
}

/// Index of the latest close approach; the earliest-listed record wins ties.
fn primary_index(approaches: &[CloseApproach]) -> Option<usize> {
    approaches
        .iter()
        .enumerate()
        .reduce(|best, candidate| {
            if candidate.1.epoch_date_close_approach > best.1.epoch_date_close_approach {
                candidate
            } else {
                best
            }
        })
        .map(|(index, _)| index)
}

/// The primary close approach of an object: the one with the largest epoch.
pub fn primary_approach(object: &RawObject) -> Option<&CloseApproach> {
    primary_index(&object.close_approach_data).map(|i| &object.close_approach_data[i])
}

/// Every object of the feed, bucket after bucket.
///
/// The same object may appear more than once.
pub fn flatten(raw: &RawFeed) -> Vec<RawObject> {
    raw.objects().cloned().collect()
}

/// Normalize a raw feed.
pub fn normalize(raw: &RawFeed, options: NormalizeOptions) -> Vec<NormalizedObject> {
    normalize_objects(flatten(raw), options)
}

/// Normalize an already flattened object list.
///
/// Objects without close-approach data are dropped before sorting.
pub fn normalize_objects(
    objects: impl IntoIterator<Item = RawObject>,
    options: NormalizeOptions,
) -> Vec<NormalizedObject> {
    let mut normalized: Vec<NormalizedObject> = objects
        .into_iter()
        .filter_map(|raw| match NormalizedObject::try_from(raw) {
            Ok(object) => Some(object),
            Err(err) => {
                debug!("Skipping feed object: {}", err);
                None
            }
        })
        .collect();

    if options.dedup_by_id {
        normalized = dedup_by_id(normalized);
    }

    sort_objects(&mut normalized, options.sort_key);
    normalized
}

/// Keep one entry per id: the one with the latest close approach.
///
/// Entries stay at the position where their id first appeared.
pub fn dedup_by_id(objects: Vec<NormalizedObject>) -> Vec<NormalizedObject> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(objects.len());
    let mut kept: Vec<NormalizedObject> = Vec::with_capacity(objects.len());

    for object in objects {
        match slots.get(&object.id) {
            Some(&slot) => {
                if object.epoch_ms() > kept[slot].epoch_ms() {
                    kept[slot] = object;
                }
            }
            None => {
                slots.insert(object.id.clone(), kept.len());
                kept.push(object);
            }
        }
    }

    kept
}

/// Stable sort by the given key.
///
/// In lunar mode, objects whose distance does not parse go last.
pub fn sort_objects(objects: &mut [NormalizedObject], key: SortKey) {
    match key {
        SortKey::Epoch => objects.sort_by_key(NormalizedObject::epoch_ms),
        SortKey::LunarDistance => objects.sort_by(compare_lunar),
    }
}

fn compare_lunar(a: &NormalizedObject, b: &NormalizedObject) -> Ordering {
    let a = a.close_approach.miss_distance.lunar().ok();
    let b = b.close_approach.miss_distance.lunar().ok();
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
