//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the control panel:
//! - View bar (render-mode buttons, upload and reset buttons)
//! - Flyout menus (view, curve trace, volume trace, slice)
//! - Control bar (wind speed, attribute, gradient range)
//! - Variants panel (vehicle variant selection)
//! - Upload panel (file selection, upload, listing)
//! - Status bar (endpoints and memory)
//! - Panel manager (panel orchestration and layout)

pub mod widgets;
pub mod view_bar;
pub mod flyouts;
pub mod control_bar;
pub mod variants_panel;
pub mod upload_panel;
pub mod status_bar;
pub mod panel_manager;
