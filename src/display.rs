//! Display strings for the card view.
//!
//! Every function here takes "now" as an argument; nothing reads the clock.

use crate::feed::{CloseApproach, EstimatedDiameter, FormatError};
use crate::normalize::NormalizedObject;
use crate::types::{unix_ms_to_date_string, MS_PER_SECOND};

/// Shown in place of a field whose source value could not be parsed.
pub const PLACEHOLDER: &str = "n/a";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Whether the approach has happened. Inclusive: an approach at `now` is expired.
pub fn is_expired(epoch_ms: i64, now_ms: i64) -> bool {
    now_ms >= epoch_ms
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Human distance between two instants, e.g. "about 3 hours".
///
/// Buckets follow the usual web convention: less than a minute, minutes,
/// about N hours, days, about N months, then about/over/almost N years.
/// Months are 30-day blocks.
pub fn distance_words(delta_ms: i64) -> String {
    let seconds = delta_ms.unsigned_abs() as i64 / MS_PER_SECOND;
    let minutes = (seconds + 30) / 60;

    if minutes < 2 {
        return if minutes == 0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes + 30) / 60;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes + MINUTES_IN_DAY / 2) / MINUTES_IN_DAY;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes + MINUTES_IN_MONTH / 2) / MINUTES_IN_MONTH;
        return format!("about {}", plural(months, "month"));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        let nearest = (minutes + MINUTES_IN_MONTH / 2) / MINUTES_IN_MONTH;
        return plural(nearest, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

/// Countdown or elapsed time: "in 3 days" / "2 hours ago".
pub fn relative_time(epoch_ms: i64, now_ms: i64) -> String {
    let words = distance_words(epoch_ms - now_ms);
    if is_expired(epoch_ms, now_ms) {
        format!("{words} ago")
    } else {
        format!("in {words}")
    }
}

/// Fixed two-decimal formatting with `,` thousands separators.
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Diameter range in kilometers, e.g. `"0.12-1.20km"`.
pub fn diameter_range(diameter: &EstimatedDiameter) -> String {
    let km = &diameter.kilometers;
    format!(
        "{}-{}km",
        format_grouped(km.estimated_diameter_min),
        format_grouped(km.estimated_diameter_max)
    )
}

/// Miss distance in lunar distances, two decimals.
pub fn lunar_miss_distance(approach: &CloseApproach) -> Result<String, FormatError> {
    approach.miss_distance.lunar().map(format_grouped)
}

/// Everything one card shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub hazardous: bool,
    /// Countdown or elapsed string.
    pub approach: String,
    /// Calendar time of the approach.
    pub approach_date: String,
    pub diameter: String,
    pub miss_distance: String,
    pub expired: bool,
}

impl Card {
    pub fn from_object(object: &NormalizedObject, now_ms: i64) -> Self {
        let epoch = object.epoch_ms();
        let miss_distance = match lunar_miss_distance(&object.close_approach) {
            Ok(lunar) => format!("{lunar} Lunar Distance"),
            Err(_) => PLACEHOLDER.to_string(),
        };

        Self {
            id: object.id.clone(),
            name: object.name.clone(),
            hazardous: object.is_potentially_hazardous_asteroid,
            approach: relative_time(epoch, now_ms),
            approach_date: unix_ms_to_date_string(epoch),
            diameter: diameter_range(&object.estimated_diameter),
            miss_distance,
            expired: is_expired(epoch, now_ms),
        }
    }
}

/// Cards for a whole list, in list order.
pub fn cards(objects: &[NormalizedObject], now_ms: i64) -> Vec<Card> {
    objects
        .iter()
        .map(|object| Card::from_object(object, now_ms))
        .collect()
}
