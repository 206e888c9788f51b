//! Wall clock resource.
//!
//! Systems never read the system clock themselves; they take `now` from
//! [`WallClock`], which this plugin refreshes at the start of every frame.

use bevy::prelude::*;

use crate::types::now_unix_ms;

/// Plugin keeping [`WallClock`] current.
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WallClock::now())
            .add_systems(First, tick_wall_clock);
    }
}

/// Current wall-clock time as seen by this frame.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallClock {
    /// Unix milliseconds.
    pub now_ms: i64,
}

impl WallClock {
    /// Clock frozen at a given instant.
    pub fn at(now_ms: i64) -> Self {
        Self { now_ms }
    }

    pub fn now() -> Self {
        Self::at(now_unix_ms())
    }
}

fn tick_wall_clock(mut clock: ResMut<WallClock>) {
    clock.now_ms = now_unix_ms();
}
