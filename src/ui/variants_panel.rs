//! Vehicle variants side panel.

use crate::app::AppState;
use crate::ui::panel_manager::PanelInteraction;
use eframe::egui;
use rtwt::{Mirrors, RideHeight, Rim, Spoiler, VariantChange};

/// Renders one radio group per variant kind.
pub fn render_variants_panel(ui: &mut egui::Ui, state: &AppState, interactions: &mut Vec<PanelInteraction>) {
    let variants = state.scene.variants;

    ui.heading("Vehicle");
    ui.separator();

    group(
        ui,
        "Rims",
        &[("Standard", Rim::Standard), ("Aero", Rim::Aero)],
        variants.rim,
        VariantChange::Rim,
        interactions,
    );
    group(
        ui,
        "Mirrors",
        &[("On", Mirrors::On), ("Off", Mirrors::Off)],
        variants.mirrors,
        VariantChange::Mirrors,
        interactions,
    );
    group(
        ui,
        "Spoiler",
        &[("Off", Spoiler::Off), ("On", Spoiler::On)],
        variants.spoiler,
        VariantChange::Spoiler,
        interactions,
    );
    group(
        ui,
        "Ride height",
        &[("Standard", RideHeight::Standard), ("High", RideHeight::High)],
        variants.ride_height,
        VariantChange::RideHeight,
        interactions,
    );

    ui.separator();
    ui.weak(format!("Variant #{}", variants.variant_index()));
}

fn group<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    title: &str,
    options: &[(&str, T)],
    current: T,
    change: fn(T) -> VariantChange,
    interactions: &mut Vec<PanelInteraction>,
) {
    ui.label(title);
    ui.horizontal(|ui| {
        for (label, value) in options {
            if ui.radio(current == *value, *label).clicked() && current != *value {
                interactions.push(PanelInteraction::VariantChanged(change(*value)));
            }
        }
    });
    ui.add_space(4.0);
}
