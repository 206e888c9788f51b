//! Scene layout through a recording renderer.

mod common;

use bevy::math::Vec3;
use common::two_day_feed;
use neowatch::config::AppConfig;
use neowatch::normalize::normalize;
use neowatch::placement::place_objects;
use neowatch::render::{
    anchor_specs, build_scene, neo_specs, star_specs, BodyKind, SceneRenderer, SphereSpec,
    STARFIELD,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct Recorder {
    spheres: Vec<SphereSpec>,
}

impl SceneRenderer for Recorder {
    type Handle = usize;

    fn spawn_sphere(&mut self, spec: &SphereSpec) -> usize {
        self.spheres.push(spec.clone());
        self.spheres.len() - 1
    }

    fn despawn(&mut self, _handle: usize) {}

    fn rotate(&mut self, _handle: usize, _delta: f32) {}
}

fn full_scene(seed: u64) -> Vec<SphereSpec> {
    let config = AppConfig::default();
    let (day_one, day_two) = two_day_feed();
    let objects = normalize(&day_one.merge(day_two), config.normalize);

    let mut rng = StdRng::seed_from_u64(seed);
    let placed = place_objects(&objects, &config.placement_mode(), &mut rng).unwrap();

    let mut specs = anchor_specs(&mut rng).unwrap();
    specs.extend(star_specs(&STARFIELD, &mut rng).unwrap());
    specs.extend(neo_specs(&placed, &mut rng));

    let mut recorder = Recorder::default();
    build_scene(&mut recorder, &specs);
    recorder.spheres
}

#[test]
fn test_full_scene_composition() {
    let spheres = full_scene(42);

    let stars = spheres.iter().filter(|s| s.kind == BodyKind::Star).count();
    let neos = spheres.iter().filter(|s| s.kind.is_neo()).count();
    assert_eq!(stars, 500);
    assert_eq!(neos, 3);
    assert_eq!(spheres.len(), 3 + 500 + 3);
}

#[test]
fn test_feed_spheres_stay_inside_scatter_cube() {
    for sphere in full_scene(7).iter().filter(|s| s.kind.is_neo()) {
        let p = sphere.position;
        assert!(p.abs().max_element() <= 5.0, "{p:?} outside the cube");
        assert!(p.abs().max_element() >= 1.0, "{p:?} too close to Earth");
    }
}

#[test]
fn test_stars_surround_the_scene() {
    for sphere in full_scene(7).iter().filter(|s| s.kind == BodyKind::Star) {
        let p: Vec3 = sphere.position;
        assert!(p.abs().max_element() >= 6.0);
        assert!(p.abs().max_element() <= 50.0);
    }
}

#[test]
fn test_same_seed_same_scene() {
    assert_eq!(full_scene(99), full_scene(99));
}
