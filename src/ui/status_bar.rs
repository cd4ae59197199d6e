//! Status bar UI rendering
//!
//! Handles the bottom status bar: memory, endpoints and background activity.

use crate::app::AppState;
use crate::ui::panel_manager::BackgroundActivity;
use crate::utils::{format_memory_mb, get_current_memory_mb};
use eframe::egui;
use egui::RichText;
use rtwt::ThemeColors;

/// Renders the status panel at the bottom of the window
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, activity: BackgroundActivity, colors: &ThemeColors) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());

        ui.label(RichText::new("|").strong());
        ui.label(format!("Render: {}", state.config.render_api_url));
        ui.label(RichText::new("|").strong());
        ui.label(format!("Uploads: {}", state.config.upload_base_url));

        if activity.commands_in_flight > 0 {
            ui.label(RichText::new("|").strong());
            ui.label(
                RichText::new(format!("{} pending", activity.commands_in_flight)).color(colors.info),
            );
        }
        if activity.upload_busy {
            ui.spinner();
        }

        if let Some(error) = &state.error_message {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(error).color(colors.error));
        }
    });
}
