//! Wind tunnel control panel GUI
//!
//! Native control surface for the real-time wind tunnel stream. The video
//! itself is shown by the streaming client; this window drives the renderer:
//! - View bar selecting the render mode, with flyout menus per mode
//! - Wind speed and gradient range sliders
//! - Vehicle variant selection
//! - Upload of STL geometry and streamline files

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `io/` - Background delivery of render commands and upload jobs
//! - `state/` - Scene, theme and layout state
//! - `ui/` - UI panel rendering and interaction collection
//! - `utils/` - Utility functions for formatting

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

mod utils;
mod io;
mod app;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use io::{CommandDispatcher, UnavailableUploads, UploadWorker};
use rtwt::{HttpRenderApi, PanelConfig, RecordingRenderApi, RenderApi, UploadApi, UploadClient};
use state::{LayoutState, ThemeState};
use ui::panel_manager::{BackgroundActivity, PanelInteraction, PanelManager};

const LAYOUT_KEY: &str = "layout";

/// Main application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let config_path = config_path_arg(std::env::args().skip(1));
    let (config, config_error) = match PanelConfig::load(config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{:#}", e);
            (PanelConfig::default(), Some(format!("Config error: {:#}", e)))
        }
    };
    log::info!("render API {}, uploads {}", config.render_api_url, config.upload_base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_title("Wind Tunnel Control Panel"),
        ..Default::default()
    };

    eframe::run_native(
        "Wind Tunnel Control Panel",
        options,
        Box::new(move |cc| Ok(Box::new(ControlPanelApp::new(cc, config, config_error)))),
    )
}

/// Extracts the value of `--config <path>` or `--config=<path>`.
fn config_path_arg(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

/// The control panel application.
///
/// Delegates to coordinators:
/// - `ApplicationCoordinator` turns interactions into state changes and requests
/// - `ThemeCoordinator` handles theme persistence and application
/// - `PanelManager` handles UI panel layout and rendering
struct ControlPanelApp {
    /// Centralized application state
    state: AppState,
    /// Fire-and-forget render command delivery
    dispatcher: CommandDispatcher,
    /// Background upload service jobs
    uploads: UploadWorker,
}

impl ControlPanelApp {
    /// Creates the panel with theme and layout restored from persistent storage.
    fn new(cc: &eframe::CreationContext, config: PanelConfig, startup_error: Option<String>) -> Self {
        let theme = ThemeState::with_theme(ThemeCoordinator::load_theme_from_storage(cc.storage));
        let layout = SettingsCoordinator::load_setting_or(cc.storage, LAYOUT_KEY, LayoutState::new());

        let mut state = AppState::with_theme_and_layout(config.clone(), theme, layout);
        state.error_message = startup_error;

        let render_api: Arc<dyn RenderApi> =
            match HttpRenderApi::new(config.render_api_url.clone(), config.request_timeout()) {
                Ok(api) => Arc::new(api),
                Err(e) => {
                    log::error!("Render API client unavailable: {}", e);
                    state.error_message = Some(format!("Render API unavailable: {}", e));
                    Arc::new(RecordingRenderApi::new())
                }
            };

        let upload_api: Arc<dyn UploadApi> =
            match UploadClient::new(&config.upload_base_url, config.request_timeout()) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    log::error!("Upload client unavailable: {}", e);
                    Arc::new(UnavailableUploads::new(e.to_string()))
                }
            };

        Self {
            state,
            dispatcher: CommandDispatcher::new(render_api).with_repaint(cc.egui_ctx.clone()),
            uploads: UploadWorker::new(upload_api),
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        let state = &mut self.state;
        let dispatcher = &self.dispatcher;
        let uploads = &self.uploads;

        match interaction {
            PanelInteraction::ViewButtonClicked(button) => {
                ApplicationCoordinator::click_view_button(state, dispatcher, button);
            }
            PanelInteraction::ViewButtonHovered(button) => {
                ApplicationCoordinator::hover_view_button(state, button);
            }
            PanelInteraction::FlyoutLeft(button) => {
                ApplicationCoordinator::leave_flyout(state, button);
            }
            PanelInteraction::SpeedDragged(value) => {
                ApplicationCoordinator::drag_speed(state, value);
            }
            PanelInteraction::SpeedCommitted(value) => {
                ApplicationCoordinator::commit_speed(state, dispatcher, value);
            }
            PanelInteraction::AttributeSelected(attribute) => {
                ApplicationCoordinator::select_attribute(state, dispatcher, attribute);
            }
            PanelInteraction::GradientDragged(range) => {
                ApplicationCoordinator::drag_gradient(state, range);
            }
            PanelInteraction::GradientCommitted(range) => {
                ApplicationCoordinator::commit_gradient(state, dispatcher, range);
            }
            PanelInteraction::CurveTracePositionChanged { position, commit } => {
                ApplicationCoordinator::update_curve_trace_position(state, dispatcher, position, commit);
            }
            PanelInteraction::CurveTraceRadiusChanged { radius, commit } => {
                ApplicationCoordinator::update_curve_trace_radius(state, dispatcher, radius, commit);
            }
            PanelInteraction::VolumeTracePositionChanged { position, commit } => {
                ApplicationCoordinator::update_volume_trace_position(state, dispatcher, position, commit);
            }
            PanelInteraction::SliceAxisSelected(axis) => {
                ApplicationCoordinator::select_slice_axis(state, dispatcher, axis);
            }
            PanelInteraction::SlicePositionChanged { position, commit } => {
                ApplicationCoordinator::update_slice_position(state, dispatcher, position, commit);
            }
            PanelInteraction::VariantChanged(change) => {
                ApplicationCoordinator::change_variant(state, dispatcher, change);
            }
            PanelInteraction::UploadPanelToggled => {
                ApplicationCoordinator::toggle_upload_panel(state, uploads, ctx);
            }
            PanelInteraction::UploadPanelClosed => {
                ApplicationCoordinator::close_upload_panel(state);
            }
            PanelInteraction::UploadFilePicked { kind, path } => {
                ApplicationCoordinator::pick_upload_file(state, kind, path);
            }
            PanelInteraction::UploadRequested(kind) => {
                ApplicationCoordinator::start_upload(state, uploads, kind, ctx);
            }
            PanelInteraction::DeleteRequested { kind, name } => {
                ApplicationCoordinator::delete_upload(state, uploads, kind, &name, ctx);
            }
            PanelInteraction::LoadIntoScene { kind, name } => {
                ApplicationCoordinator::load_into_scene(dispatcher, kind, &name);
            }
            PanelInteraction::RefreshRequested => {
                ApplicationCoordinator::refresh_listing(uploads, ctx);
            }
        }
    }
}

impl eframe::App for ControlPanelApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_setting(storage, LAYOUT_KEY, &self.state.layout);
    }

    /// Main update loop.
    ///
    /// 1. Fold finished upload jobs into the state
    /// 2. Apply a due Reset clear
    /// 3. Apply theme
    /// 4. Render all panels via PanelManager
    /// 5. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_upload_completion(&mut self.state, &self.uploads, ctx);

        if let Some(wait) = ApplicationCoordinator::tick_view(&mut self.state, Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        let activity = BackgroundActivity {
            commands_in_flight: self.dispatcher.in_flight(),
            upload_busy: self.uploads.is_busy(),
        };

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state, activity) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
