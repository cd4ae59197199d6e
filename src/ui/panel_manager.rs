//! Panel orchestration and layout management.
//!
//! Lays out the view bar, control bar, status bar, optional variants panel
//! and the floating upload window, and collects what the user did this frame.

use crate::app::AppState;
use crate::ui::{control_bar, flyouts, status_bar, upload_panel, variants_panel, view_bar};
use eframe::egui;
use rtwt::{Attribute, ScalarRange, SliceAxis, UploadKind, VariantChange, ViewButton};
use std::path::PathBuf;

/// Result of panel interactions that need to be handled by the application coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInteraction {
    /// A view bar button was clicked
    ViewButtonClicked(ViewButton),
    /// The pointer moved onto a view bar button
    ViewButtonHovered(ViewButton),
    /// The pointer left the flyout opened by a button
    FlyoutLeft(ViewButton),

    /// Wind speed slider moved
    SpeedDragged(f64),
    /// Wind speed slider released
    SpeedCommitted(f64),
    /// Visualization attribute chosen
    AttributeSelected(Attribute),
    /// Gradient range slider moved
    GradientDragged(ScalarRange),
    /// Gradient range slider released
    GradientCommitted(ScalarRange),

    CurveTracePositionChanged { position: [f64; 3], commit: bool },
    CurveTraceRadiusChanged { radius: f64, commit: bool },
    VolumeTracePositionChanged { position: [f64; 3], commit: bool },
    SliceAxisSelected(SliceAxis),
    SlicePositionChanged { position: f64, commit: bool },

    /// A vehicle variant was picked
    VariantChanged(VariantChange),

    /// Upload button on the view bar
    UploadPanelToggled,
    /// Upload window closed
    UploadPanelClosed,
    /// A file was picked for a slot
    UploadFilePicked { kind: UploadKind, path: PathBuf },
    /// Upload button of a slot
    UploadRequested(UploadKind),
    /// Delete button of a listed file
    DeleteRequested { kind: UploadKind, name: String },
    /// Load button of a listed file
    LoadIntoScene { kind: UploadKind, name: String },
    /// Refresh button of the listing
    RefreshRequested,
}

/// Activity of background work, shown in the status bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundActivity {
    pub commands_in_flight: usize,
    pub upload_busy: bool,
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Several interactions can happen in one frame (a hover and a click,
    /// for instance), so all of them are returned in order.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        activity: BackgroundActivity,
    ) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();
        let colors = state.theme.current_theme().colors.clone();

        // View bar at the top
        let bar = egui::TopBottomPanel::top("view_bar")
            .show(ctx, |ui| view_bar::render_view_bar(ui, state, &colors, &mut interactions))
            .inner;

        // Flyout of the hovered button, anchored below it
        if let Some(anchor) = bar.flyout_anchor {
            flyouts::render_flyout(ctx, state, anchor, &mut interactions);
        }

        // Status bar at the very bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, activity, &colors);
        });

        // Speed and gradient controls above the status bar
        egui::TopBottomPanel::bottom("control_bar")
            .resizable(false)
            .show(ctx, |ui| {
                egui::Frame::default().inner_margin(4.0).show(ui, |ui| {
                    control_bar::render_control_bar(ui, state, &colors, &mut interactions);
                });
            });

        if state.layout.is_variants_open() {
            egui::SidePanel::right("variants_panel")
                .resizable(false)
                .default_width(180.0)
                .show(ctx, |ui| {
                    variants_panel::render_variants_panel(ui, state, &mut interactions);
                });
        }

        // The stream itself is shown by the streaming client behind this panel
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                let mode = state
                    .scene
                    .view
                    .active_button()
                    .and_then(|b| b.render_mode())
                    .map(|m| format!("{:?}", m))
                    .unwrap_or_else(|| "default view".to_string());
                ui.label(egui::RichText::new(format!("Render mode: {}", mode)).color(colors.text_dim));
            });
        });

        if state.upload.is_visible() {
            upload_panel::render_upload_window(ctx, state, &colors, &mut interactions);
        }

        interactions
    }
}
