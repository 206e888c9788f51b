//! Scene placement for normalized objects.
//!
//! Assigns each object a position in render space. Placement is pure given
//! the random source, which the caller owns so that seeded generators give
//! reproducible layouts.

#[cfg(test)]
mod proptest_placement;

use bevy::log::warn;
use bevy::math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::feed::FormatError;
use crate::normalize::NormalizedObject;

/// Mean Earth-Moon distance.
pub const KM_PER_LUNAR_DISTANCE: f64 = 384_400.0;

/// Attempts per point before a scatter gives up.
pub const MAX_SCATTER_ATTEMPTS: usize = 100;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("invalid placement configuration: {0}")]
    Configuration(String),
}

/// Render-space axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Physical quantity used by [`PlacementMode::LinearByMetric`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Miss distance in lunar distances.
    #[default]
    LunarDistance,
    /// Miss distance in kilometers.
    KilometerDistance,
    /// Upper bound of the estimated diameter, km.
    DiameterMax,
}

impl Metric {
    /// Divisor giving offsets of a few render units for typical feed values.
    pub fn default_divisor(self) -> f64 {
        match self {
            Metric::LunarDistance => 10.0,
            Metric::KilometerDistance => 10.0 * KM_PER_LUNAR_DISTANCE,
            Metric::DiameterMax => 0.2,
        }
    }

    pub fn value(self, object: &NormalizedObject) -> Result<f64, FormatError> {
        match self {
            Metric::LunarDistance => object.close_approach.miss_distance.lunar(),
            Metric::KilometerDistance => object.close_approach.miss_distance.kilometers(),
            Metric::DiameterMax => Ok(object
                .estimated_diameter
                .kilometers
                .estimated_diameter_max),
        }
    }
}

/// Uniform scatter inside a cube, keeping clear of the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    /// Number of points (or the maximum number of objects placed).
    pub count: usize,
    /// Edge length of the cube; coordinates lie in `[-spread/2, spread/2]`.
    pub spread: f32,
    /// A point with every coordinate inside `(-min_offset, min_offset)` is redrawn.
    pub min_offset: f32,
}

impl Scatter {
    pub fn validate(&self) -> Result<(), PlacementError> {
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(PlacementError::Configuration(format!(
                "scatter spread must be positive, got {}",
                self.spread
            )));
        }
        if !self.min_offset.is_finite() || self.min_offset < 0.0 {
            return Err(PlacementError::Configuration(format!(
                "scatter min offset must be non-negative, got {}",
                self.min_offset
            )));
        }
        if self.min_offset >= self.spread / 2.0 {
            return Err(PlacementError::Configuration(format!(
                "scatter min offset {} must be below half the spread ({})",
                self.min_offset,
                self.spread / 2.0
            )));
        }
        Ok(())
    }

    /// Draw one point, redrawing rejected ones up to [`MAX_SCATTER_ATTEMPTS`] times.
    fn sample<R: Rng>(&self, rng: &mut R) -> Result<Vec3, PlacementError> {
        let half = self.spread / 2.0;
        for _ in 0..MAX_SCATTER_ATTEMPTS {
            let point = Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            );
            if !self.too_close(point) {
                return Ok(point);
            }
        }
        Err(PlacementError::Configuration(format!(
            "no point found outside min offset {} after {} attempts",
            self.min_offset, MAX_SCATTER_ATTEMPTS
        )))
    }

    /// Draw `count` independent points.
    pub fn points<R: Rng>(&self, rng: &mut R) -> Result<Vec<Vec3>, PlacementError> {
        self.validate()?;
        (0..self.count).map(|_| self.sample(rng)).collect()
    }

    /// Whether all three coordinates are within the exclusion band at once.
    pub fn too_close(&self, point: Vec3) -> bool {
        point.x.abs() < self.min_offset
            && point.y.abs() < self.min_offset
            && point.z.abs() < self.min_offset
    }
}

/// How objects are laid out.
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementMode {
    /// Random positions; at most `count` objects are placed.
    RandomScatter(Scatter),
    /// Two-sided line along `axis`, distance proportional to `metric`.
    LinearByMetric {
        metric: Metric,
        divisor: f64,
        axis: Axis,
    },
    /// Explicit positions, one per object.
    Fixed(Vec<Vec3>),
}

impl PlacementMode {
    /// Positions for `count` bodies, whether or not they come from the feed.
    ///
    /// A scatter yields at most `Scatter::count` points. Linear placement
    /// needs a metric per object and is refused.
    pub fn positions<R: Rng>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec3>, PlacementError> {
        match self {
            PlacementMode::RandomScatter(scatter) => {
                scatter.validate()?;
                (0..count.min(scatter.count))
                    .map(|_| scatter.sample(rng))
                    .collect()
            }
            PlacementMode::Fixed(positions) => {
                if positions.len() != count {
                    return Err(PlacementError::Configuration(format!(
                        "{} fixed positions for {} bodies",
                        positions.len(),
                        count
                    )));
                }
                Ok(positions.clone())
            }
            PlacementMode::LinearByMetric { .. } => Err(PlacementError::Configuration(
                "linear placement needs feed objects".to_string(),
            )),
        }
    }
}

impl Default for PlacementMode {
    fn default() -> Self {
        PlacementMode::RandomScatter(Scatter {
            count: usize::MAX,
            spread: 10.0,
            min_offset: 0.0,
        })
    }
}

/// A normalized object with its render position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    pub object: NormalizedObject,
    pub position: Vec3,
}

/// Signed offset of the `index`-th object: odd indices positive, even negative.
pub fn linear_offset(index: usize, value: f64, divisor: f64) -> f64 {
    let sign = if index % 2 == 1 { 1.0 } else { -1.0 };
    sign * value / divisor
}

/// Place every object according to `mode`.
///
/// With [`PlacementMode::LinearByMetric`], an object whose metric does not
/// parse is left out with a warning; the others keep their index-based offsets.
pub fn place_objects<R: Rng>(
    objects: &[NormalizedObject],
    mode: &PlacementMode,
    rng: &mut R,
) -> Result<Vec<PlacedObject>, PlacementError> {
    match mode {
        PlacementMode::LinearByMetric {
            metric,
            divisor,
            axis,
        } => place_linear(objects, *metric, *divisor, *axis),
        PlacementMode::RandomScatter(_) | PlacementMode::Fixed(_) => {
            let positions = mode.positions(objects.len(), rng)?;
            Ok(objects
                .iter()
                .zip(positions)
                .map(|(object, position)| PlacedObject {
                    object: object.clone(),
                    position,
                })
                .collect())
        }
    }
}

fn place_linear(
    objects: &[NormalizedObject],
    metric: Metric,
    divisor: f64,
    axis: Axis,
) -> Result<Vec<PlacedObject>, PlacementError> {
    if !divisor.is_finite() || divisor == 0.0 {
        return Err(PlacementError::Configuration(format!(
            "linear placement divisor must be finite and non-zero, got {divisor}"
        )));
    }

    Ok(objects
        .iter()
        .enumerate()
        .filter_map(|(index, object)| match metric.value(object) {
            Ok(value) => Some(PlacedObject {
                object: object.clone(),
                position: axis.unit() * linear_offset(index, value, divisor) as f32,
            }),
            Err(err) => {
                warn!("Not placing {} ({}): {}", object.name, object.id, err);
                None
            }
        })
        .collect())
}
