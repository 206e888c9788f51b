//! neowatch - near-Earth object viewer
//!
//! Library crate with the feed model, normalization, placement and display
//! formatting, plus the Bevy plugins of the two views.

pub mod camera;
pub mod config;
pub mod display;
pub mod feed;
pub mod normalize;
pub mod placement;
pub mod render;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
