//! Host overlay: onboarding hint, feature card and agent speech bubble.
//!
//! Listens to the game's messages only; it never touches [`GameState`](crate::game::GameState).

use bevy::prelude::*;
use bevy_egui::egui;

use crate::content::Feature;
use crate::game::{self, AgentCard, AgentNearby, FeatureActivated, FirstInputReceived};

/// What the overlay currently shows.
#[derive(Resource, Debug, Clone)]
pub struct HudState {
    /// Onboarding hint, hidden after the first input.
    pub show_hint: bool,
    /// Feature card content.
    pub feature: Option<&'static Feature>,
    /// Speech bubble content and its anchor in window coordinates.
    pub agent: Option<(AgentCard, Vec2)>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            show_hint: true,
            feature: None,
            agent: None,
        }
    }
}

impl HudState {
    fn apply_agent(&mut self, msg: &AgentNearby) {
        self.agent = msg.agent.clone().zip(msg.screen);
    }
}

/// Draws the overlay from game messages.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>().add_systems(
            Update,
            (collect_notices, draw_hud)
                .chain()
                .after(game::systems::run_frame),
        );
    }
}

fn collect_notices(
    mut first: MessageReader<FirstInputReceived>,
    mut features: MessageReader<FeatureActivated>,
    mut agents: MessageReader<AgentNearby>,
    mut hud: ResMut<HudState>,
) {
    if first.read().count() > 0 {
        hud.show_hint = false;
    }
    if let Some(FeatureActivated(feature)) = features.read().last() {
        hud.feature = *feature;
    }
    if let Some(msg) = agents.read().last() {
        hud.apply_agent(msg);
    }
}

fn draw_hud(mut egui_ctx: Query<&mut bevy_egui::EguiContext>, hud: Res<HudState>, mut ready: Local<bool>) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();

    if hud.show_hint {
        egui::Area::new(egui::Id::new("hud-hint"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Arrow keys or swipe to explore").monospace());
            });
    }

    if let Some(feature) = hud.feature {
        egui::Window::new(feature.label)
            .id(egui::Id::new("hud-feature"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(feature.kind.tag()).small().strong());
                ui.label(feature.description);
                if let Some(link) = feature.link {
                    ui.hyperlink_to("Open", link);
                }
            });
    }

    if let Some((card, screen)) = &hud.agent {
        egui::Area::new(egui::Id::new("hud-agent"))
            .fixed_pos(egui::pos2(screen.x, screen.y - 56.0))
            .pivot(egui::Align2::CENTER_BOTTOM)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(format!("{} {}", card.glyph, card.id)).strong());
                    ui.label(card.phrase);
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FEATURES;

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_message::<FirstInputReceived>()
            .add_message::<FeatureActivated>()
            .add_message::<AgentNearby>()
            .init_resource::<HudState>()
            .add_systems(Update, collect_notices);
        app
    }

    #[test]
    fn hint_hidden_after_first_input() {
        let mut app = hud_app();
        app.update();
        assert!(app.world().resource::<HudState>().show_hint);

        app.world_mut().write_message(FirstInputReceived);
        app.update();
        assert!(!app.world().resource::<HudState>().show_hint);
    }

    #[test]
    fn feature_card_follows_latest_message() {
        let mut app = hud_app();
        app.world_mut().write_message(FeatureActivated(Some(&FEATURES[0])));
        app.update();
        assert_eq!(app.world().resource::<HudState>().feature, Some(&FEATURES[0]));

        app.world_mut().write_message(FeatureActivated(None));
        app.update();
        assert!(app.world().resource::<HudState>().feature.is_none());
    }

    #[test]
    fn agent_bubble_needs_position() {
        let card = AgentCard {
            id: "vesper",
            glyph: 'V',
            phrase: "hello",
        };
        let mut hud = HudState::default();
        hud.apply_agent(&AgentNearby {
            agent: Some(card.clone()),
            screen: Some(Vec2::new(10.0, 20.0)),
        });
        assert_eq!(hud.agent, Some((card, Vec2::new(10.0, 20.0))));

        hud.apply_agent(&AgentNearby {
            agent: None,
            screen: None,
        });
        assert!(hud.agent.is_none());
    }
}
