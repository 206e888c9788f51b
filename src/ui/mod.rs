//! Card view built with egui.

pub mod cards;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use cards::{CardDeck, CardRefreshTimer};

/// Plugin that adds the card view.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CardDeckPlugin)
            .add_systems(Startup, setup_ui_camera)
            .add_systems(EguiPrimaryContextPass, cards::cards_system);
    }
}

/// egui draws through a camera; the card view has no 3D scene to look at.
fn setup_ui_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Keeps [`CardDeck`] current; needs no window or egui context.
pub struct CardDeckPlugin;

impl Plugin for CardDeckPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CardDeck>()
            .init_resource::<CardRefreshTimer>()
            .add_systems(Update, cards::refresh_cards);
    }
}
