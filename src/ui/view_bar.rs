//! View bar UI rendering
//!
//! Top bar with the render-mode buttons on the left and the upload and
//! reset buttons on the right. The bar itself can be collapsed.

use crate::app::AppState;
use crate::ui::panel_manager::PanelInteraction;
use eframe::egui;
use egui::{Color32, RichText};
use rtwt::{ThemeColors, ViewButton};

/// Where the flyout of the hovered button should be drawn.
#[derive(Debug, Clone, Copy)]
pub struct FlyoutAnchor {
    pub button: ViewButton,
    pub rect: egui::Rect,
}

/// What the rest of the frame needs to know about the bar.
#[derive(Debug, Default)]
pub struct ViewBarOutput {
    pub flyout_anchor: Option<FlyoutAnchor>,
}

/// Renders the view bar.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `colors` - Active theme palette
/// * `interactions` - Collected user interactions for this frame
pub fn render_view_bar(
    ui: &mut egui::Ui,
    state: &mut AppState,
    colors: &ThemeColors,
    interactions: &mut Vec<PanelInteraction>,
) -> ViewBarOutput {
    let mut output = ViewBarOutput::default();

    ui.horizontal(|ui| {
        let arrow = if state.layout.is_view_bar_open() { "◀" } else { "▶" };
        if ui.button(arrow).on_hover_text("Show or hide the view buttons").clicked() {
            state.layout.toggle_view_bar();
        }

        if state.layout.is_view_bar_open() {
            let hovered = state.scene.view.hovered_button();

            for button in ViewButton::BAR {
                let response = view_button(ui, button, state.scene.view.is_highlighted(button), colors);

                if response.clicked() {
                    interactions.push(PanelInteraction::ViewButtonClicked(button));
                }
                if response.hovered() && hovered != Some(button) {
                    interactions.push(PanelInteraction::ViewButtonHovered(button));
                }
                if hovered == Some(button) && button.has_flyout() {
                    output.flyout_anchor = Some(FlyoutAnchor { button, rect: response.rect });
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let reset = view_button(
                ui,
                ViewButton::Reset,
                state.scene.view.is_highlighted(ViewButton::Reset),
                colors,
            );
            if reset.clicked() {
                interactions.push(PanelInteraction::ViewButtonClicked(ViewButton::Reset));
            }

            let upload_fill = if state.upload.is_visible() { colors.accent } else { colors.button_idle };
            let upload = ui.add(
                egui::Button::new(RichText::new("📤 Upload").color(Color32::WHITE)).fill(upload_fill),
            );
            if upload.clicked() {
                interactions.push(PanelInteraction::UploadPanelToggled);
            }
        });
    });

    output
}

fn view_button(ui: &mut egui::Ui, button: ViewButton, highlighted: bool, colors: &ThemeColors) -> egui::Response {
    let fill = if highlighted { colors.accent } else { colors.button_idle };
    ui.add(
        egui::Button::new(RichText::new(button.label()).color(Color32::WHITE))
            .fill(fill)
            .min_size(egui::vec2(96.0, 28.0)),
    )
}
