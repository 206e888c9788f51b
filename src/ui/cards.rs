//! Card view: one card per feed object.
//!
//! Card strings depend on the current time, so the deck is recomputed by a
//! one-second one-shot timer that is re-armed after every recompute, and
//! immediately whenever the feed changes.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::display::{cards, Card};
use crate::feed::FeedState;
use crate::time::WallClock;

/// Seconds between two recomputes of the deck.
pub const CARD_REFRESH_SECS: f32 = 1.0;

/// Colors for the card view.
mod colors {
    use bevy_egui::egui::Color32;

    pub const CARD_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 230);
    pub const EXPIRED_BG: Color32 = Color32::from_rgb(70, 70, 74);
    pub const CARD_BORDER: Color32 = Color32::from_rgb(60, 60, 80);
    pub const DANGER: Color32 = Color32::from_rgb(224, 85, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

const CARD_WIDTH: f32 = 240.0;

/// Card strings for the current feed, as of `computed_at_ms`.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct CardDeck {
    pub cards: Vec<Card>,
    pub computed_at_ms: i64,
}

impl CardDeck {
    pub fn recompute(&mut self, feed: &FeedState, now_ms: i64) {
        self.cards = cards(feed.objects(), now_ms);
        self.computed_at_ms = now_ms;
    }
}

/// One-shot timer driving deck recomputes.
#[derive(Resource)]
pub struct CardRefreshTimer(pub Timer);

impl Default for CardRefreshTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(CARD_REFRESH_SECS, TimerMode::Once))
    }
}

/// Recompute the deck when the feed changes or the timer fires, then re-arm.
pub fn refresh_cards(
    time: Res<Time>,
    feed: Res<FeedState>,
    clock: Res<WallClock>,
    mut timer: ResMut<CardRefreshTimer>,
    mut deck: ResMut<CardDeck>,
) {
    timer.0.tick(time.delta());
    if feed.is_changed() || timer.0.just_finished() {
        deck.recompute(&feed, clock.now_ms);
        timer.0.reset();
    }
}

/// Draw the deck, or a status message when there is nothing to show.
pub fn cards_system(mut contexts: EguiContexts, feed: Res<FeedState>, deck: Res<CardDeck>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Near-Earth objects approaching today");
        ui.add_space(8.0);

        match &*feed {
            FeedState::Loading => {
                ui.label("Loading...");
                return;
            }
            FeedState::Unavailable => {
                ui.label("No data available.");
                return;
            }
            FeedState::Ready(objects) if objects.is_empty() => {
                ui.label("No near-Earth objects approaching today.");
                return;
            }
            FeedState::Ready(_) => {}
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for card in &deck.cards {
                    render_card(ui, card);
                }
            });
        });
    });
}

fn render_card(ui: &mut egui::Ui, card: &Card) {
    let fill = if card.expired {
        colors::EXPIRED_BG
    } else {
        colors::CARD_BG
    };

    egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::same(12))
        .stroke(egui::Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                let heading_color = if card.hazardous {
                    colors::DANGER
                } else {
                    colors::TEXT
                };
                ui.label(
                    egui::RichText::new(&card.name)
                        .strong()
                        .size(16.0)
                        .color(heading_color),
                );
                ui.label(egui::RichText::new(&card.approach).size(14.0));
                ui.label(egui::RichText::new(&card.approach_date).weak().size(12.0));
                ui.separator();
                ui.label(egui::RichText::new(format!("Diameter: {}", card.diameter)).size(13.0));
                ui.label(
                    egui::RichText::new(format!("Miss distance: {}", card.miss_distance))
                        .size(13.0),
                );
            });
        });
}
