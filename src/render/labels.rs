//! Hover label drawn with egui at the pointer.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::render::highlight::HoveredBody;

/// Plugin drawing the name of the hovered feed sphere.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>()
            .add_systems(EguiPrimaryContextPass, draw_hover_label);
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Offset from the pointer in screen pixels.
    pub offset: f32,
    pub font_size: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            offset: 15.0,
            font_size: 14.0,
        }
    }
}

fn draw_hover_label(
    mut contexts: EguiContexts,
    hovered: Res<HoveredBody>,
    settings: Res<LabelSettings>,
) {
    let (Some(name), Some(cursor)) = (&hovered.name, hovered.cursor) else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("hover_label"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();
            let label_pos = egui::pos2(cursor.x + settings.offset, cursor.y + settings.offset);
            let font = egui::FontId::proportional(settings.font_size);

            // Shadow
            painter.text(
                label_pos + egui::vec2(1.0, 1.0),
                egui::Align2::LEFT_TOP,
                name,
                font.clone(),
                egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            );

            painter.text(
                label_pos,
                egui::Align2::LEFT_TOP,
                name,
                font,
                egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
            );
        });
}
