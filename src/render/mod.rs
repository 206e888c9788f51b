//! 3D scene view.
//!
//! Anchors, starfield and feed spheres are all drawn through
//! [`SceneRenderer`], with [`BevySceneRenderer`] as the live implementation.

mod background;
pub mod bodies;
pub mod highlight;
mod labels;
pub mod renderer;
mod spin;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::BodiesPlugin;
use self::highlight::HighlightPlugin;
use self::labels::LabelPlugin;
use self::spin::spin_bodies;

pub use self::background::STARFIELD;
pub use self::highlight::HoveredBody;
pub use self::renderer::{
    anchor_specs, build_scene, neo_specs, star_specs, BevySceneRenderer, BodyKind, SceneBody,
    SceneRenderer, SphereSpec, Spin,
};

/// Plugin aggregating the scene view.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BodiesPlugin, BackgroundPlugin, HighlightPlugin, LabelPlugin))
            .add_systems(Update, spin_bodies);
    }
}
