//! Centralized application state for the control panel.
//!
//! Composed of focused state components; each keeps its own invariants and
//! exposes intent-revealing methods.

use crate::state::{LayoutState, SceneState, ThemeState};
use rtwt::{PanelConfig, UploadPanelState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Parameters mirrored to the render backend
    pub scene: SceneState,

    /// Upload panel selection, status and listing
    pub upload: UploadPanelState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// UI layout state
    pub layout: LayoutState,

    // ===== Top-Level State =====
    /// Endpoints the panel talks to
    pub config: PanelConfig,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl AppState {
    /// Creates application state for `config` with default theme and layout.
    pub fn new(config: PanelConfig) -> Self {
        Self::with_theme_and_layout(config, ThemeState::new(), LayoutState::new())
    }

    /// Creates application state with theme and layout restored from storage.
    pub fn with_theme_and_layout(config: PanelConfig, theme: ThemeState, layout: LayoutState) -> Self {
        Self {
            scene: SceneState::with_reset_delay(config.reset_clear_delay()),
            upload: UploadPanelState::new(),
            theme,
            layout,
            config,
            error_message: None,
        }
    }
}
