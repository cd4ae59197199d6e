//! UI layout state management.
//!
//! Tracks which collapsible parts of the panel are open. Persisted between
//! sessions.

use serde::{Deserialize, Serialize};

/// State related to UI layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutState {
    /// Whether the view button bar is expanded
    view_bar_open: bool,
    /// Whether the vehicle variants side panel is shown
    variants_open: bool,
    /// Whether the gradient legend shows tick labels
    show_ticks: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self {
            view_bar_open: true,
            variants_open: false,
            show_ticks: true,
        }
    }

    // ===== Layout Queries =====

    pub fn is_view_bar_open(&self) -> bool {
        self.view_bar_open
    }

    pub fn is_variants_open(&self) -> bool {
        self.variants_open
    }

    pub fn shows_ticks(&self) -> bool {
        self.show_ticks
    }

    // ===== Layout Mutations =====

    pub fn toggle_view_bar(&mut self) {
        self.view_bar_open = !self.view_bar_open;
    }

    pub fn toggle_variants(&mut self) {
        self.variants_open = !self.variants_open;
    }

    pub(crate) fn show_ticks_mut(&mut self) -> &mut bool {
        &mut self.show_ticks
    }
}
