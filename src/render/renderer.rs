//! Renderer capability and scene layout.
//!
//! Scene construction is written against [`SceneRenderer`], so the layout
//! logic runs unchanged against Bevy or against a recording stub in tests.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;

use crate::placement::{PlacedObject, PlacementError, PlacementMode, Scatter};

/// Spin in radians per second at speed 1.0 (0.01 rad per frame at 60 fps).
pub const SPIN_RATE: f32 = 0.6;

/// Render scale of a feed object sphere.
pub const NEO_SCALE: f32 = 0.1;

/// Upper bound for a feed object's random spin speed.
pub const MAX_NEO_SPIN: f32 = 0.2;

/// Upper bound for a star's random scale.
pub const MAX_STAR_SCALE: f32 = 0.1;

/// What a sphere stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyKind {
    Sun,
    Earth,
    Moon,
    /// Decorative background star.
    Star,
    /// A feed object.
    Neo {
        id: String,
        name: String,
        hazardous: bool,
    },
}

impl BodyKind {
    pub fn is_neo(&self) -> bool {
        matches!(self, BodyKind::Neo { .. })
    }

    /// Name shown on hover, if the body has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            BodyKind::Sun => Some("Sun"),
            BodyKind::Earth => Some("Earth"),
            BodyKind::Moon => Some("Moon"),
            BodyKind::Star => None,
            BodyKind::Neo { name, .. } => Some(name),
        }
    }
}

/// One sphere to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereSpec {
    pub kind: BodyKind,
    pub position: Vec3,
    /// Radius of the unit sphere after scaling.
    pub scale: f32,
    /// Multiplier on [`SPIN_RATE`]; zero means static.
    pub spin_speed: f32,
}

/// Capability the scene is drawn through.
pub trait SceneRenderer {
    type Handle: Copy;

    /// Create a sphere as described by `spec`.
    fn spawn_sphere(&mut self, spec: &SphereSpec) -> Self::Handle;

    /// Remove a previously spawned sphere.
    fn despawn(&mut self, handle: Self::Handle);

    /// Rotate a sphere about its vertical axis by `delta` radians.
    fn rotate(&mut self, handle: Self::Handle, delta: f32);
}

/// Earth at the origin, the Moon one unit out, the Sun four units back.
pub fn anchor_placement() -> PlacementMode {
    PlacementMode::Fixed(vec![
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-4.0, 0.0, 0.0),
    ])
}

/// Sun, Earth and Moon, positioned by [`anchor_placement`].
pub fn anchor_specs<R: Rng>(rng: &mut R) -> Result<Vec<SphereSpec>, PlacementError> {
    let bodies: [(BodyKind, f32, f32); 3] = [
        (BodyKind::Earth, 0.75 / 7.0, 1.0),
        (BodyKind::Moon, 0.33 / 7.0, 0.3),
        (BodyKind::Sun, 1.5 / 7.0, 0.1),
    ];
    let positions = anchor_placement().positions(bodies.len(), rng)?;

    Ok(bodies
        .into_iter()
        .zip(positions)
        .map(|((kind, scale, spin_speed), position)| SphereSpec {
            kind,
            position,
            scale,
            spin_speed,
        })
        .collect())
}

/// Randomly placed background stars.
pub fn star_specs<R: Rng>(
    starfield: &Scatter,
    rng: &mut R,
) -> Result<Vec<SphereSpec>, PlacementError> {
    let points = starfield.points(rng)?;
    Ok(points
        .into_iter()
        .map(|position| SphereSpec {
            kind: BodyKind::Star,
            position,
            scale: rng.gen_range(0.0..MAX_STAR_SCALE),
            spin_speed: 0.0,
        })
        .collect())
}

/// One sphere per placed feed object.
pub fn neo_specs<R: Rng>(placed: &[PlacedObject], rng: &mut R) -> Vec<SphereSpec> {
    placed
        .iter()
        .map(|p| SphereSpec {
            kind: BodyKind::Neo {
                id: p.object.id.clone(),
                name: p.object.name.clone(),
                hazardous: p.object.is_potentially_hazardous_asteroid,
            },
            position: p.position,
            scale: NEO_SCALE,
            spin_speed: rng.gen_range(0.0..MAX_NEO_SPIN),
        })
        .collect()
}

/// Spawn every spec, returning handles in spec order.
pub fn build_scene<S: SceneRenderer>(renderer: &mut S, specs: &[SphereSpec]) -> Vec<S::Handle> {
    specs.iter().map(|spec| renderer.spawn_sphere(spec)).collect()
}

/// Rotation for one frame.
pub fn spin_delta(speed: f32, dt: f32) -> f32 {
    SPIN_RATE * speed * dt
}

/// Advance every `(handle, speed)` pair by one frame of `dt` seconds.
pub fn advance_spins<S: SceneRenderer>(
    renderer: &mut S,
    spins: impl IntoIterator<Item = (S::Handle, f32)>,
    dt: f32,
) {
    for (handle, speed) in spins {
        renderer.rotate(handle, spin_delta(speed, dt));
    }
}

/// Component attached to every sphere the renderer spawns.
#[derive(Component, Clone, Debug)]
pub struct SceneBody {
    pub kind: BodyKind,
    /// World-space radius, used for picking.
    pub radius: f32,
}

/// Component for spheres that rotate.
#[derive(Component, Clone, Copy, Debug)]
pub struct Spin {
    pub speed: f32,
}

/// Material handles shared between spheres of the same kind.
#[derive(Default)]
pub struct SceneMaterials {
    unit_sphere: Option<Handle<Mesh>>,
    star: Option<Handle<StandardMaterial>>,
    neo: Option<Handle<StandardMaterial>>,
    hazardous_neo: Option<Handle<StandardMaterial>>,
}

/// Approximate visual color for a body.
fn body_color(kind: &BodyKind) -> Color {
    match kind {
        BodyKind::Sun => Color::srgb(1.0, 0.95, 0.4),
        BodyKind::Earth => Color::srgb(0.2, 0.5, 0.8),
        BodyKind::Moon => Color::srgb(0.7, 0.7, 0.7),
        BodyKind::Star => Color::WHITE,
        BodyKind::Neo { hazardous: false, .. } => Color::srgb(0.6, 0.6, 0.6),
        BodyKind::Neo { hazardous: true, .. } => Color::srgb(0.8, 0.35, 0.3),
    }
}

fn body_material(kind: &BodyKind) -> StandardMaterial {
    let color = body_color(kind);
    match kind {
        BodyKind::Sun => StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 2.0,
            ..default()
        },
        BodyKind::Star => StandardMaterial {
            base_color: color,
            emissive: LinearRgba::WHITE * 0.5,
            unlit: true,
            ..default()
        },
        BodyKind::Neo { .. } => StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.8,
            metallic: 0.1,
            ..default()
        },
        BodyKind::Earth | BodyKind::Moon => StandardMaterial {
            base_color: color,
            ..default()
        },
    }
}

/// Bevy implementation of [`SceneRenderer`].
#[derive(SystemParam)]
pub struct BevySceneRenderer<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    spinning: Query<'w, 's, &'static mut Transform, With<Spin>>,
    cache: Local<'s, SceneMaterials>,
}

impl BevySceneRenderer<'_, '_> {
    fn unit_sphere(&mut self) -> Handle<Mesh> {
        if let Some(mesh) = &self.cache.unit_sphere {
            return mesh.clone();
        }
        let mesh = self.meshes.add(Sphere::new(1.0));
        self.cache.unit_sphere = Some(mesh.clone());
        mesh
    }

    fn material(&mut self, kind: &BodyKind) -> Handle<StandardMaterial> {
        let slot = match kind {
            BodyKind::Star => &mut self.cache.star,
            BodyKind::Neo { hazardous: false, .. } => &mut self.cache.neo,
            BodyKind::Neo { hazardous: true, .. } => &mut self.cache.hazardous_neo,
            BodyKind::Sun | BodyKind::Earth | BodyKind::Moon => {
                return self.materials.add(body_material(kind));
            }
        };
        if let Some(handle) = slot {
            return handle.clone();
        }
        let handle = self.materials.add(body_material(kind));
        *slot = Some(handle.clone());
        handle
    }
}

impl SceneRenderer for BevySceneRenderer<'_, '_> {
    type Handle = Entity;

    fn spawn_sphere(&mut self, spec: &SphereSpec) -> Entity {
        let mesh = self.unit_sphere();
        let material = self.material(&spec.kind);

        let mut entity = self.commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(spec.position).with_scale(Vec3::splat(spec.scale)),
            SceneBody {
                kind: spec.kind.clone(),
                radius: spec.scale,
            },
        ));
        if spec.spin_speed > 0.0 {
            entity.insert(Spin {
                speed: spec.spin_speed,
            });
        }
        entity.id()
    }

    fn despawn(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }

    fn rotate(&mut self, handle: Entity, delta: f32) {
        if let Ok(mut transform) = self.spinning.get_mut(handle) {
            transform.rotate_y(delta);
        }
    }
}
