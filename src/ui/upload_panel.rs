//! Upload panel UI rendering
//!
//! Floating window with one slot per file kind, a status line and the
//! listing of files already on the upload service.

use crate::app::AppState;
use crate::ui::panel_manager::PanelInteraction;
use crate::utils::display_name;
use eframe::egui;
use egui::RichText;
use rtwt::{format_size_kb, StatusTone, ThemeColors, UploadKind};

/// Renders the upload window.
///
/// # Arguments
/// * `ctx` - The egui context the window is shown in
/// * `state` - Reference to application state
/// * `colors` - Active theme palette
/// * `interactions` - Collected user interactions for this frame
pub fn render_upload_window(
    ctx: &egui::Context,
    state: &AppState,
    colors: &ThemeColors,
    interactions: &mut Vec<PanelInteraction>,
) {
    let mut open = true;

    egui::Window::new("📤 Upload Files")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            upload_slot(ui, state, UploadKind::Stl, "STL geometry", interactions);
            ui.add_space(6.0);
            upload_slot(ui, state, UploadKind::Streamlines, "Streamlines (JSON)", interactions);

            if !state.upload.status().is_empty() {
                ui.separator();
                let color = match state.upload.status_tone() {
                    StatusTone::Success => colors.success,
                    StatusTone::Error => colors.error,
                    StatusTone::Info => colors.info,
                };
                ui.label(RichText::new(state.upload.status()).color(color));
            }

            ui.separator();
            file_listing(ui, state, colors, interactions);
        });

    if !open {
        interactions.push(PanelInteraction::UploadPanelClosed);
    }
}

fn upload_slot(
    ui: &mut egui::Ui,
    state: &AppState,
    kind: UploadKind,
    title: &str,
    interactions: &mut Vec<PanelInteraction>,
) {
    let panel = &state.upload;

    ui.strong(title);
    ui.horizontal(|ui| {
        let pick = ui.add_enabled(!panel.is_uploading(), egui::Button::new("Choose file…"));
        if pick.clicked() {
            // No extension filter: a wrong pick is reported in the status line
            let mut dialog = rfd::FileDialog::new().set_title(title);
            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }
            if let Some(path) = dialog.pick_file() {
                interactions.push(PanelInteraction::UploadFilePicked { kind, path });
            }
        }

        match panel.selected(kind) {
            Some(path) => ui.label(display_name(path)),
            None => ui.weak(format!("no {} file selected", kind.extension())),
        };

        let label = if panel.is_uploading() { "Uploading…" } else { "Upload" };
        if ui.add_enabled(panel.can_upload(kind), egui::Button::new(label)).clicked() {
            interactions.push(PanelInteraction::UploadRequested(kind));
        }
    });
}

fn file_listing(
    ui: &mut egui::Ui,
    state: &AppState,
    colors: &ThemeColors,
    interactions: &mut Vec<PanelInteraction>,
) {
    let listing = state.upload.listing();

    ui.horizontal(|ui| {
        ui.strong("Uploaded files");
        if ui.small_button("⟳").on_hover_text("Refresh").clicked() {
            interactions.push(PanelInteraction::RefreshRequested);
        }
    });

    egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
        ui.label(RichText::new("STL").color(colors.text_dim));
        if listing.stl_files.is_empty() {
            ui.weak("none");
        }
        for file in &listing.stl_files {
            file_row(ui, UploadKind::Stl, &file.name, format_size_kb(file.size), interactions);
        }

        ui.add_space(4.0);
        ui.label(RichText::new("Streamlines").color(colors.text_dim));
        if listing.streamline_files.is_empty() {
            ui.weak("none");
        }
        for file in &listing.streamline_files {
            file_row(
                ui,
                UploadKind::Streamlines,
                &file.name,
                format!("{} streamlines", file.num_streamlines),
                interactions,
            );
        }
    });
}

fn file_row(
    ui: &mut egui::Ui,
    kind: UploadKind,
    name: &str,
    detail: String,
    interactions: &mut Vec<PanelInteraction>,
) {
    ui.horizontal(|ui| {
        ui.label(name);
        ui.weak(detail);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("🗑 Delete").clicked() {
                interactions.push(PanelInteraction::DeleteRequested { kind, name: name.to_string() });
            }
            if ui.small_button("Load").on_hover_text("Load into scene").clicked() {
                interactions.push(PanelInteraction::LoadIntoScene { kind, name: name.to_string() });
            }
        });
    });
}
