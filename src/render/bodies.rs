//! Scene bodies: the fixed anchors and one sphere per feed object.

use bevy::prelude::*;
use rand::Rng;

use crate::config::AppConfig;
use crate::feed::FeedState;
use crate::normalize::NormalizedObject;
use crate::placement::{place_objects, PlacementError, PlacementMode};
use crate::render::renderer::{
    anchor_specs, build_scene, neo_specs, BevySceneRenderer, SceneBody, SceneRenderer,
};

/// Plugin spawning the anchors and keeping feed spheres in step with the feed.
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_anchors).add_systems(
            Update,
            sync_feed_bodies.run_if(resource_changed::<FeedState>),
        );
    }
}

fn spawn_anchors(mut renderer: BevySceneRenderer) {
    match anchor_specs(&mut rand::thread_rng()) {
        Ok(anchors) => {
            build_scene(&mut renderer, &anchors);
            info!("Spawned {} anchor bodies", anchors.len());
        }
        Err(err) => error!("Could not place anchor bodies: {}", err),
    }
}

/// Replace the feed spheres with a fresh placement of `objects`.
///
/// The stale handles are removed first. On a placement error nothing new is
/// spawned.
pub fn rebuild_feed_bodies<S: SceneRenderer, R: Rng>(
    renderer: &mut S,
    stale: impl IntoIterator<Item = S::Handle>,
    objects: &[NormalizedObject],
    mode: &PlacementMode,
    rng: &mut R,
) -> Result<Vec<S::Handle>, PlacementError> {
    for handle in stale {
        renderer.despawn(handle);
    }

    let placed = place_objects(objects, mode, rng)?;
    let specs = neo_specs(&placed, rng);
    Ok(build_scene(renderer, &specs))
}

fn sync_feed_bodies(
    feed: Res<FeedState>,
    config: Res<AppConfig>,
    bodies: Query<(Entity, &SceneBody)>,
    mut renderer: BevySceneRenderer,
) {
    let stale: Vec<Entity> = bodies
        .iter()
        .filter(|(_, body)| body.kind.is_neo())
        .map(|(entity, _)| entity)
        .collect();

    let mut rng = rand::thread_rng();
    match rebuild_feed_bodies(
        &mut renderer,
        stale,
        feed.objects(),
        &config.placement_mode(),
        &mut rng,
    ) {
        Ok(spawned) => info!("Spawned {} feed bodies", spawned.len()),
        Err(err) => error!("Could not place feed objects: {}", err),
    }
}
