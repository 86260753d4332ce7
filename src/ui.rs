//! Start screen and final message, drawn with egui over the 3D scene.
//!
//! Everything here is read-only with respect to the [`Scene`]: button presses
//! come back as a [`UiAction`] and the caller applies them.

use crate::palette;
use crate::scene::Scene;
use crate::timeline::Overlay;

const HEADING_SIZE: f32 = 32.0;
const BODY_SIZE: f32 = 18.0;
const BUTTON_SIZE: f32 = 20.0;

/// Veil alpha at full overlay opacity.
const VEIL_ALPHA: f32 = 0.85;

/// A button press this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// The start button was pressed.
    Start,
    /// The say-thanks button was pressed; the link has been handed to the platform.
    SayThanks,
}

/// Draw whichever overlays are showing and report a button press, if any.
pub fn draw(ctx: &egui::Context, scene: &Scene) -> Option<UiAction> {
    let timeline = scene.timeline();
    let text = &scene.config().overlay;
    let mut action = None;

    let start = timeline.start_screen();
    if !start.hidden {
        paint_veil(ctx, start.opacity);

        egui::Area::new(egui::Id::new("start_screen"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.multiply_opacity(start.opacity);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(&text.start_heading).size(HEADING_SIZE).strong());
                    ui.add_space(16.0);
                    let button = egui::Button::new(
                        egui::RichText::new(&text.start_button).size(BUTTON_SIZE),
                    );
                    if ui.add_enabled(start.interactive, button).clicked() {
                        action = Some(UiAction::Start);
                    }
                });
            });
    }

    let message = timeline.final_message();
    if !message.hidden && show_message(ctx, message, scene) {
        ctx.open_url(egui::OpenUrl::same_tab(scene.thanks_link()));
        action = Some(UiAction::SayThanks);
    }

    action
}

/// Full-window wash in the background color, faded with the start screen.
fn paint_veil(ctx: &egui::Context, opacity: f32) {
    let [r, g, b] = palette::hex_to_srgb(palette::BACKGROUND)
        .to_array()
        .map(|c| (c * 255.0).round() as u8);
    let alpha = (opacity.clamp(0.0, 1.0) * VEIL_ALPHA * 255.0).round() as u8;

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("start_veil"),
    ));
    painter.rect_filled(
        ctx.screen_rect(),
        0.0,
        egui::Color32::from_rgba_unmultiplied(r, g, b, alpha),
    );
}

/// Returns true if the thanks button was clicked.
fn show_message(ctx: &egui::Context, message: &Overlay, scene: &Scene) -> bool {
    let text = &scene.config().overlay;
    let scale = message.scale.max(0.01);
    let mut clicked = false;

    egui::Area::new(egui::Id::new("final_message"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.multiply_opacity(message.opacity);
            egui::Frame::popup(ui.style())
                .inner_margin(24.0 * scale)
                .show(ui, |ui| {
                    ui.set_max_width(ctx.screen_rect().width() * 0.8);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(&text.message_heading)
                                .size(HEADING_SIZE * scale)
                                .strong(),
                        );
                        ui.add_space(8.0 * scale);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&text.message_body).size(BODY_SIZE * scale),
                            )
                            .wrap(),
                        );
                        ui.add_space(16.0 * scale);
                        let button = egui::Button::new(
                            egui::RichText::new(&text.thanks_button).size(BUTTON_SIZE * scale),
                        );
                        clicked = ui.add_enabled(message.interactive, button).clicked();
                    });
                });
        });

    clicked
}
