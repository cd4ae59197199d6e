//! Theme support for the control panel.
//!
//! Two palettes are built in. Both share the panel's accent green for active
//! view buttons and a dark slate for idle ones, so the button bar reads the
//! same regardless of the surrounding theme.
//!
//! ```
//! use rtwt::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let dark = manager.get_theme("Dark").unwrap();
//! println!("accent: {:?}", dark.colors.accent);
//! ```

use egui::Color32;
use std::collections::HashMap;

pub const DEFAULT_THEME: &str = "Dark";

/// Color palette of a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,

    pub text: Color32,
    pub text_dim: Color32,

    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // View bar
    pub accent: Color32,
    pub button_idle: Color32,

    // Status lines
    pub success: Color32,
    pub error: Color32,
    pub info: Color32,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

/// Holds every built-in theme.
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    fallback: Theme,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert("Dark".to_string(), dark_theme());
        themes.insert("Light".to_string(), light_theme());
        Self { themes, fallback: dark_theme() }
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Theme by name, falling back to the default theme.
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        self.themes.get(name).unwrap_or(&self.fallback)
    }

    /// Sorted theme names.
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Builds egui visuals for `theme`.
    pub fn visuals(&self, theme: &Theme) -> egui::Visuals {
        let mut visuals = if theme.name == "Light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.window_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.hover;

        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.info;
        visuals
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark slate panel over the stream".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#1b1c1f"),
            panel_background: hex_to_color32("#202226"),
            extreme_background: hex_to_color32("#121315"),

            text: hex_to_color32("#e8e8e8"),
            text_dim: hex_to_color32("#8a8d93"),

            selection: hex_to_color32("#3d5a10"),
            hover: hex_to_color32("#34373c"),
            border: hex_to_color32("#44474d"),

            accent: hex_to_color32("#76b900"),
            button_idle: hex_to_color32("#2a2c30"),

            success: hex_to_color32("#76b900"),
            error: hex_to_color32("#e5534b"),
            info: hex_to_color32("#d4a72c"),
        },
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light panel with egui default widgets".to_string(),
        colors: ThemeColors {
            background: Color32::from_rgb(248, 248, 248),
            panel_background: Color32::from_rgb(242, 242, 242),
            extreme_background: Color32::from_rgb(255, 255, 255),

            text: Color32::from_rgb(20, 20, 20),
            text_dim: Color32::from_rgb(120, 120, 120),

            selection: Color32::from_rgb(200, 230, 160),
            hover: Color32::from_rgb(220, 220, 220),
            border: Color32::from_rgb(160, 160, 160),

            accent: hex_to_color32("#76b900"),
            button_idle: hex_to_color32("#2a2c30"),

            success: Color32::from_rgb(60, 140, 0),
            error: Color32::from_rgb(200, 40, 40),
            info: Color32::from_rgb(180, 120, 0),
        },
    }
}

/// Converts a hex color string (like "#76b900") to Color32.
///
/// Malformed input yields black.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}
