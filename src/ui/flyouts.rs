//! Flyout menus under the view bar.
//!
//! At most one flyout is drawn: the one belonging to the hovered button.
//! The View flyout closes as soon as the pointer leaves both the button and
//! the flyout; the render-mode flyouts stay until another button takes over.

use crate::app::AppState;
use crate::ui::panel_manager::PanelInteraction;
use crate::ui::view_bar::FlyoutAnchor;
use crate::ui::widgets::{position_sliders, scalar_slider};
use eframe::egui;
use rtwt::{SliceAxis, ViewButton};

/// Gap tolerated between the button and its flyout before it counts as left.
const LEAVE_MARGIN: f32 = 6.0;

/// Renders the flyout of `anchor.button`.
pub fn render_flyout(
    ctx: &egui::Context,
    state: &mut AppState,
    anchor: FlyoutAnchor,
    interactions: &mut Vec<PanelInteraction>,
) {
    let area = egui::Area::new(egui::Id::new("view_flyout"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor.rect.left_bottom() + egui::vec2(0.0, 2.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(220.0);
                ui.strong(anchor.button.label());
                ui.separator();
                match anchor.button {
                    ViewButton::View => view_menu(ui, state),
                    ViewButton::CurveTrace => curve_trace_menu(ui, state, interactions),
                    ViewButton::VolumeTrace => volume_trace_menu(ui, state, interactions),
                    ViewButton::Slice => slice_menu(ui, state, interactions),
                    ViewButton::Volume | ViewButton::Reset => {}
                }
            });
        });

    if anchor.button == ViewButton::View {
        let region = area.response.rect.union(anchor.rect).expand(LEAVE_MARGIN);
        let pointer = ctx.input(|i| i.pointer.hover_pos());
        if pointer.is_some_and(|pos| !region.contains(pos)) {
            interactions.push(PanelInteraction::FlyoutLeft(ViewButton::View));
        }
    }
}

fn view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    let mut variants_open = state.layout.is_variants_open();
    if ui.checkbox(&mut variants_open, "Vehicle variants").changed() {
        state.layout.toggle_variants();
    }

    ui.checkbox(state.layout.show_ticks_mut(), "Gradient legend ticks");

    ui.separator();

    let current = state.theme.current_theme_name().to_string();
    let names: Vec<String> = state
        .theme
        .theme_manager()
        .list_themes()
        .into_iter()
        .map(str::to_string)
        .collect();
    ui.horizontal(|ui| {
        ui.label("Theme");
        for name in names {
            if ui.selectable_label(current == name, name.as_str()).clicked() {
                state.theme.set_theme(name);
            }
        }
    });
}

fn curve_trace_menu(ui: &mut egui::Ui, state: &AppState, interactions: &mut Vec<PanelInteraction>) {
    let params = state.scene.curve_trace;

    ui.label("Seed position");
    if let Some(edit) = position_sliders(ui, params.position()) {
        interactions.push(PanelInteraction::CurveTracePositionChanged {
            position: edit.value,
            commit: edit.commit,
        });
    }

    ui.label("Seed radius");
    if let Some(edit) = scalar_slider(ui, params.radius(), 0.0..=1.0, "Radius") {
        interactions.push(PanelInteraction::CurveTraceRadiusChanged {
            radius: edit.value,
            commit: edit.commit,
        });
    }
}

fn volume_trace_menu(ui: &mut egui::Ui, state: &AppState, interactions: &mut Vec<PanelInteraction>) {
    ui.label("Probe position");
    if let Some(edit) = position_sliders(ui, state.scene.volume_trace.position()) {
        interactions.push(PanelInteraction::VolumeTracePositionChanged {
            position: edit.value,
            commit: edit.commit,
        });
    }
}

fn slice_menu(ui: &mut egui::Ui, state: &AppState, interactions: &mut Vec<PanelInteraction>) {
    let params = state.scene.slice;

    ui.horizontal(|ui| {
        ui.label("Section");
        for axis in SliceAxis::ALL {
            if ui.selectable_label(params.axis() == axis, axis.as_str()).clicked() {
                interactions.push(PanelInteraction::SliceAxisSelected(axis));
            }
        }
    });

    if let Some(edit) = scalar_slider(ui, params.position(), -1.0..=1.0, "Position") {
        interactions.push(PanelInteraction::SlicePositionChanged {
            position: edit.value,
            commit: edit.commit,
        });
    }
}
