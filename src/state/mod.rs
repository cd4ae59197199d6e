//! State management modules for the control panel.
//!
//! This module contains state-only logic (no UI concerns):
//! - Scene state (parameters mirrored to the render backend)
//! - Theme state (theme manager, current theme)
//! - Layout state (which panels are open)

mod scene_state;
mod theme_state;
mod layout_state;

pub use scene_state::SceneState;
pub use theme_state::ThemeState;
pub use layout_state::LayoutState;
