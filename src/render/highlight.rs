//! Hover detection for feed spheres.
//!
//! The cursor ray is tested against every NEO sphere; the nearest hit becomes
//! the hovered body and gets a highlight ring.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::MainCamera;
use crate::render::renderer::SceneBody;

/// Spheres this small are picked as if they had this radius.
pub const MIN_PICK_RADIUS: f32 = 0.05;

/// Picking slack relative to the sphere radius.
pub const PICK_SLACK: f32 = 1.5;

/// Plugin providing hover highlighting.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredBody>()
            .add_systems(Update, (detect_hover, draw_highlight).chain());
    }
}

/// Resource tracking the currently hovered feed sphere.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct HoveredBody {
    pub entity: Option<Entity>,
    /// Name shown in the hover label.
    pub name: Option<String>,
    /// Cursor position in logical window pixels.
    pub cursor: Option<Vec2>,
}

impl HoveredBody {
    fn clear(&mut self) {
        if self.entity.is_some() || self.cursor.is_some() {
            *self = HoveredBody::default();
        }
    }
}

/// Distance along the ray to the first intersection with a sphere.
///
/// `direction` must be normalized. Returns `None` when the ray misses or the
/// sphere lies entirely behind the origin.
pub fn ray_sphere_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else if near < 0.0 {
        Some(0.0)
    } else {
        Some(near)
    }
}

fn pick_radius(radius: f32) -> f32 {
    radius.max(MIN_PICK_RADIUS) * PICK_SLACK
}

fn detect_hover(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    bodies: Query<(Entity, &GlobalTransform, &SceneBody)>,
    mut hovered: ResMut<HoveredBody>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let Some(cursor_pos) = window.cursor_position() else {
        hovered.clear();
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        hovered.clear();
        return;
    };

    let mut closest: Option<(Entity, &SceneBody, f32)> = None;
    for (entity, transform, body) in bodies.iter() {
        if !body.kind.is_neo() {
            continue;
        }
        let Some(dist) = ray_sphere_hit(
            ray.origin,
            *ray.direction,
            transform.translation(),
            pick_radius(body.radius),
        ) else {
            continue;
        };
        if closest.is_none_or(|(_, _, d)| dist < d) {
            closest = Some((entity, body, dist));
        }
    }

    match closest {
        Some((entity, body, _)) => {
            let next = HoveredBody {
                entity: Some(entity),
                name: body.kind.label().map(str::to_string),
                cursor: Some(cursor_pos),
            };
            if *hovered != next {
                *hovered = next;
            }
        }
        None => hovered.clear(),
    }
}

/// Draw a ring around the hovered sphere, facing the camera.
fn draw_highlight(
    mut gizmos: Gizmos,
    hovered: Res<HoveredBody>,
    bodies: Query<(&GlobalTransform, &SceneBody)>,
) {
    let Some(entity) = hovered.entity else {
        return;
    };

    let Ok((transform, body)) = bodies.get(entity) else {
        return;
    };

    let ring_radius = pick_radius(body.radius);
    let center = transform.translation();
    let color = Color::srgba(0.0, 1.0, 1.0, 0.8);

    let segments = 32;
    for i in 0..segments {
        let t0 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let t1 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        let p0 = center + Vec3::new(ring_radius * t0.cos(), ring_radius * t0.sin(), 0.0);
        let p1 = center + Vec3::new(ring_radius * t1.cos(), ring_radius * t1.sin(), 0.0);

        gizmos.line(p0, p1, color);
    }
}
