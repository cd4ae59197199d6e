//! Control bar UI rendering
//!
//! Bottom bar with the wind speed gauge, the visualization attribute picker
//! and the gradient range sliders with their legend.

use crate::app::AppState;
use crate::ui::panel_manager::PanelInteraction;
use crate::ui::widgets::committed;
use eframe::egui;
use egui::{Color32, RichText};
use rtwt::controls::{WIND_SPEED_MAX, WIND_SPEED_MIN};
use rtwt::{Attribute, ScalarRange, ThemeColors};

const LEGEND_WIDTH: f32 = 320.0;
const LEGEND_HEIGHT: f32 = 14.0;
const LEGEND_STEPS: usize = 32;

/// Renders the control bar.
pub fn render_control_bar(
    ui: &mut egui::Ui,
    state: &AppState,
    colors: &ThemeColors,
    interactions: &mut Vec<PanelInteraction>,
) {
    ui.horizontal(|ui| {
        speed_controls(ui, state, colors, interactions);
        ui.separator();
        attribute_picker(ui, state, interactions);
        ui.separator();
        gradient_controls(ui, state, colors, interactions);
    });
}

fn speed_controls(
    ui: &mut egui::Ui,
    state: &AppState,
    colors: &ThemeColors,
    interactions: &mut Vec<PanelInteraction>,
) {
    ui.vertical(|ui| {
        let speed = state.scene.speed.value();
        ui.label(RichText::new(format!("{:.0}", speed)).size(28.0).strong().color(colors.accent));
        ui.add(
            egui::ProgressBar::new((speed / WIND_SPEED_MAX) as f32)
                .desired_width(140.0)
                .fill(colors.accent),
        );

        let mut value = speed;
        let response = ui.add(
            egui::Slider::new(&mut value, WIND_SPEED_MIN..=WIND_SPEED_MAX)
                .step_by(1.0)
                .text("Wind speed"),
        );
        if committed(&response) {
            interactions.push(PanelInteraction::SpeedCommitted(value));
        } else if response.changed() {
            interactions.push(PanelInteraction::SpeedDragged(value));
        }
    });
}

fn attribute_picker(ui: &mut egui::Ui, state: &AppState, interactions: &mut Vec<PanelInteraction>) {
    let selected = state.scene.gradient.selected();
    egui::ComboBox::from_id_salt("attribute_picker")
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            for attribute in Attribute::ALL {
                if ui.selectable_label(selected == attribute, attribute.label()).clicked() {
                    interactions.push(PanelInteraction::AttributeSelected(attribute));
                }
            }
        });
}

fn gradient_controls(
    ui: &mut egui::Ui,
    state: &AppState,
    colors: &ThemeColors,
    interactions: &mut Vec<PanelInteraction>,
) {
    ui.vertical(|ui| {
        let scalars = state.scene.gradient.scalars();
        let mut min = scalars.min;
        let mut max = scalars.max;

        let min_response = ui.add(egui::Slider::new(&mut min, 0.0..=1.0).text("Min"));
        let max_response = ui.add(egui::Slider::new(&mut max, 0.0..=1.0).text("Max"));

        let range = ScalarRange { min, max };
        if committed(&min_response) || committed(&max_response) {
            interactions.push(PanelInteraction::GradientCommitted(range));
        } else if min_response.changed() || max_response.changed() {
            interactions.push(PanelInteraction::GradientDragged(range));
        }

        gradient_legend(ui, state, colors);
    });
}

/// Colormap strip with the physical range and optional tick labels.
fn gradient_legend(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors) {
    let (lo, hi) = state.scene.gradient.physical_range();

    let (rect, _) = ui.allocate_exact_size(egui::vec2(LEGEND_WIDTH, LEGEND_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let step_width = rect.width() / LEGEND_STEPS as f32;
    for i in 0..LEGEND_STEPS {
        let t = i as f32 / (LEGEND_STEPS - 1) as f32;
        let x = rect.left() + i as f32 * step_width;
        let band = egui::Rect::from_min_max(egui::pos2(x, rect.top()), egui::pos2(x + step_width + 0.5, rect.bottom()));
        painter.rect_filled(band, 0.0, colormap(t));
    }

    let (ticks_rect, _) = ui.allocate_exact_size(egui::vec2(LEGEND_WIDTH, 14.0), egui::Sense::hover());
    let painter = ui.painter_at(ticks_rect.expand2(egui::vec2(16.0, 0.0)));
    let font = egui::FontId::proportional(10.0);

    if state.layout.shows_ticks() && hi != lo {
        for tick in state.scene.gradient.ticks() {
            let t = ((tick - lo) / (hi - lo)) as f32;
            let x = ticks_rect.left() + t * ticks_rect.width();
            painter.text(
                egui::pos2(x, ticks_rect.top()),
                egui::Align2::CENTER_TOP,
                format!("{:.0}", tick),
                font.clone(),
                colors.text_dim,
            );
        }
    } else {
        painter.text(ticks_rect.left_top(), egui::Align2::LEFT_TOP, format!("{:.0}", lo), font.clone(), colors.text_dim);
        painter.text(ticks_rect.right_top(), egui::Align2::RIGHT_TOP, format!("{:.0}", hi), font, colors.text_dim);
    }
}

/// Blue to red ramp through green, close to the renderer's default colormap.
fn colormap(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let (r, g, b) = if t < 0.5 {
        let u = t * 2.0;
        (0.0, u, 1.0 - u)
    } else {
        let u = (t - 0.5) * 2.0;
        (u, 1.0 - u, 0.0)
    };
    Color32::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
