//! Per-frame rotation of spinning bodies.

use bevy::prelude::*;

use crate::render::renderer::{advance_spins, BevySceneRenderer, Spin};

/// Rotate every body carrying [`Spin`] about its vertical axis.
pub fn spin_bodies(time: Res<Time>, spinning: Query<(Entity, &Spin)>, mut renderer: BevySceneRenderer) {
    advance_spins(
        &mut renderer,
        spinning.iter().map(|(entity, spin)| (entity, spin.speed)),
        time.delta_secs(),
    );
}
