//! Background stars and lighting.

use bevy::prelude::*;

use crate::placement::Scatter;
use crate::render::renderer::{build_scene, star_specs, BevySceneRenderer};

/// Stars are kept clear of the cube holding the anchors and feed objects.
pub const STARFIELD: Scatter = Scatter {
    count: 500,
    spread: 100.0,
    min_offset: 6.0,
};

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

fn spawn_starfield(mut renderer: BevySceneRenderer) {
    let mut rng = rand::thread_rng();
    match star_specs(&STARFIELD, &mut rng) {
        Ok(stars) => {
            build_scene(&mut renderer, &stars);
            info!("Spawned {} background stars", stars.len());
        }
        Err(err) => error!("Could not place starfield: {}", err),
    }
}

fn spawn_lighting(mut commands: Commands) {
    // Keeps the night side of each sphere visible.
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: 10_000_000.0,
            range: 100.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 2000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene lighting initialized");
}
