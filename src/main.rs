//! neowatch - near-Earth object viewer
//!
//! Shows today's close approaches from NASA's NeoWs feed, either as a card
//! list or as spheres around Earth.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use neowatch::camera::CameraPlugin;
use neowatch::config::{AppConfig, ViewMode};
use neowatch::feed::{FeedLoaderPlugin, FeedSourceHandle};
use neowatch::render::RenderPlugin;
use neowatch::time::ClockPlugin;
use neowatch::ui::UiPlugin;

fn main() {
    let (config, config_error) = AppConfig::load();
    let source = FeedSourceHandle(config.feed_source());
    let view = config.view;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "neowatch".to_string(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default())
    // Insert resources before plugins that depend on them
    .insert_resource(config)
    .insert_resource(source)
    .add_plugins((ClockPlugin, FeedLoaderPlugin));

    match view {
        ViewMode::Scene => app.add_plugins((CameraPlugin, RenderPlugin)),
        ViewMode::Cards => app.add_plugins(UiPlugin),
    };

    // The log plugin is only up once the app runs.
    let config_error = config_error.map(|err| err.to_string());
    app.add_systems(Startup, move |config: Res<AppConfig>| {
        if let Some(err) = &config_error {
            warn!("Configuration ignored, using defaults: {}", err);
        }
        info!(
            "Showing {:?} view, sorted by {:?}",
            config.view, config.normalize.sort_key
        );
    });

    app.run();
}
