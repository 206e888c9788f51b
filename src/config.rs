//! Application configuration.
//!
//! Read once from environment variables at startup and stored as a resource.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;

use crate::feed::source::DEFAULT_FEED_URL;
use crate::feed::{FeedSource, FileFeedSource, HttpFeedSource};
use crate::normalize::{NormalizeOptions, SortKey};
use crate::placement::{Axis, Metric, PlacementMode, Scatter};

/// Key used when `NEO_NASA_KEY` is not set (rate-limited by the API).
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Default feed revalidation interval.
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Which presentation layer the app shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Card list.
    Cards,
    /// 3D solar-system scene.
    #[default]
    Scene,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cards" => Ok(ViewMode::Cards),
            "scene" => Ok(ViewMode::Scene),
            other => Err(format!("unknown view `{other}` (expected `cards` or `scene`)")),
        }
    }
}

/// How feed objects are laid out in the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementKind {
    /// Random positions around the anchors.
    #[default]
    Scatter,
    /// Along the x axis by the given metric.
    Linear(Metric),
}

impl FromStr for PlacementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scatter" => Ok(PlacementKind::Scatter),
            "linear" | "linear-lunar" => Ok(PlacementKind::Linear(Metric::LunarDistance)),
            "linear-km" => Ok(PlacementKind::Linear(Metric::KilometerDistance)),
            "linear-diameter" => Ok(PlacementKind::Linear(Metric::DiameterMax)),
            other => Err(format!(
                "unknown placement `{other}` (expected `scatter`, `linear`, `linear-km` or `linear-diameter`)"
            )),
        }
    }
}

/// Application configuration resource.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    /// NeoWs REST base URL.
    pub feed_url: String,
    /// Read the feed from this file instead of the network.
    pub feed_file: Option<PathBuf>,
    pub normalize: NormalizeOptions,
    pub view: ViewMode,
    pub placement: PlacementKind,
    /// Interval between feed refreshes.
    pub revalidate: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_file: None,
            normalize: NormalizeOptions {
                sort_key: SortKey::Epoch,
                dedup_by_id: true,
            },
            view: ViewMode::default(),
            placement: PlacementKind::default(),
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: ToString,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        var,
        reason: err.to_string(),
    })
}

impl AppConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup("NEO_NASA_KEY").filter(|k| !k.trim().is_empty()) {
            config.api_key = key.trim().to_string();
        }
        if let Some(url) = lookup("NEO_FEED_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    var: "NEO_FEED_URL",
                    reason: format!("`{url}` is not an http(s) URL"),
                });
            }
            config.feed_url = url;
        }
        if let Some(path) = lookup("NEO_FEED_FILE").filter(|p| !p.is_empty()) {
            config.feed_file = Some(PathBuf::from(path));
        }
        if let Some(key) = lookup("NEO_SORT_KEY") {
            config.normalize.sort_key = parse_var("NEO_SORT_KEY", &key)?;
        }
        if let Some(dedup) = lookup("NEO_DEDUP") {
            config.normalize.dedup_by_id = parse_var("NEO_DEDUP", &dedup)?;
        }
        if let Some(view) = lookup("NEO_VIEW") {
            config.view = parse_var("NEO_VIEW", &view)?;
        }
        if let Some(placement) = lookup("NEO_PLACEMENT") {
            config.placement = parse_var("NEO_PLACEMENT", &placement)?;
        }
        if let Some(secs) = lookup("NEO_REVALIDATE_SECS") {
            let secs: u64 = parse_var("NEO_REVALIDATE_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "NEO_REVALIDATE_SECS",
                    reason: "must be positive".to_string(),
                });
            }
            config.revalidate = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Load from the environment, falling back to defaults on error.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::from_env() {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Placement used for feed objects in the scene.
    pub fn placement_mode(&self) -> PlacementMode {
        match self.placement {
            PlacementKind::Scatter => PlacementMode::RandomScatter(Scatter {
                count: usize::MAX,
                spread: 10.0,
                min_offset: 1.0,
            }),
            PlacementKind::Linear(metric) => PlacementMode::LinearByMetric {
                metric,
                divisor: metric.default_divisor(),
                axis: Axis::X,
            },
        }
    }

    /// Feed source matching this configuration.
    pub fn feed_source(&self) -> Arc<dyn FeedSource> {
        match &self.feed_file {
            Some(path) => Arc::new(FileFeedSource::new(path.clone())),
            None => Arc::new(HttpFeedSource::new(
                self.feed_url.clone(),
                self.api_key.clone(),
            )),
        }
    }
}
