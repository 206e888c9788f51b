//! Camera for the 3D scene.
//!
//! A perspective camera looking at Earth from +Z. The scroll wheel dollies
//! it along its view axis.

use bevy::{input::mouse::AccumulatedMouseScroll, prelude::*};

/// Starting distance from the origin.
pub const DEFAULT_DISTANCE: f32 = 5.0;

/// Closest the camera may get to the origin.
pub const MIN_DISTANCE: f32 = 0.5;

/// Farthest the camera may get; beyond this the starfield is left behind.
pub const MAX_DISTANCE: f32 = 60.0;

/// Fraction of the current distance covered per scroll step.
pub const ZOOM_SPEED: f32 = 0.1;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera state.
#[derive(Resource)]
pub struct CameraState {
    /// Distance from the origin.
    pub distance: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
        }
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, camera_zoom);
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(mut commands: Commands, state: Res<CameraState>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, state.distance).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Distance after one scroll of `delta` lines.
///
/// Logarithmic: each step covers a fixed fraction of the current distance.
pub fn zoomed_distance(distance: f32, delta: f32) -> f32 {
    (distance * (1.0 - delta * ZOOM_SPEED)).clamp(MIN_DISTANCE, MAX_DISTANCE)
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut camera_state: ResMut<CameraState>,
) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    camera_state.distance = zoomed_distance(camera_state.distance, mouse_scroll.delta.y);
    let direction = transform.translation.normalize_or(Vec3::Z);
    transform.translation = direction * camera_state.distance;
}
