//! View and render-mode selection.
//!
//! The button bar holds one toggle per view. Clicking a view toggles it,
//! closes every other flyout, and for views backed by a render mode emits one
//! `set_rendering_mode` command. "Reset" emits `reset` and clears the active
//! button after a short delay so the click flash is visible.
//!
//! Slice is tracked by its own flag in addition to the active button. The
//! hovered button is the only flyout state: at most one flyout is open.

use crate::commands::RenderCommand;
use std::time::{Duration, Instant};

/// Delay after which a Reset click stops being highlighted.
pub const DEFAULT_RESET_CLEAR_DELAY: Duration = Duration::from_millis(150);

/// Visualization algorithm selected on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Smoke probes
    VolumeTrace,
    /// Stream lines from a seed sphere
    CurveTrace,
    /// Raw volume rendering
    Volume,
    /// Volume slice plane
    Slice,
}

impl RenderMode {
    /// Integer code understood by `set_rendering_mode`.
    pub fn code(self) -> i32 {
        match self {
            RenderMode::VolumeTrace => 0,
            RenderMode::CurveTrace => 1,
            RenderMode::Volume => 2,
            RenderMode::Slice => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RenderMode::VolumeTrace),
            1 => Some(RenderMode::CurveTrace),
            2 => Some(RenderMode::Volume),
            3 => Some(RenderMode::Slice),
            _ => None,
        }
    }
}

/// A button of the view bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewButton {
    View,
    CurveTrace,
    VolumeTrace,
    Volume,
    Slice,
    Reset,
}

impl ViewButton {
    /// Buttons in bar order (Reset lives on the side bar).
    pub const BAR: [ViewButton; 5] = [
        ViewButton::View,
        ViewButton::CurveTrace,
        ViewButton::VolumeTrace,
        ViewButton::Volume,
        ViewButton::Slice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewButton::View => "View",
            ViewButton::CurveTrace => "Curve Trace",
            ViewButton::VolumeTrace => "Volume Trace",
            ViewButton::Volume => "Volume",
            ViewButton::Slice => "Slice",
            ViewButton::Reset => "Reset",
        }
    }

    /// Parses a button label, ignoring case, spaces, dashes and underscores.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "view" => Some(ViewButton::View),
            "curvetrace" => Some(ViewButton::CurveTrace),
            "volumetrace" => Some(ViewButton::VolumeTrace),
            "volume" => Some(ViewButton::Volume),
            "slice" => Some(ViewButton::Slice),
            "reset" => Some(ViewButton::Reset),
            _ => None,
        }
    }

    /// Render mode this button selects, if any.
    pub fn render_mode(self) -> Option<RenderMode> {
        match self {
            ViewButton::CurveTrace => Some(RenderMode::CurveTrace),
            ViewButton::VolumeTrace => Some(RenderMode::VolumeTrace),
            ViewButton::Volume => Some(RenderMode::Volume),
            ViewButton::Slice => Some(RenderMode::Slice),
            ViewButton::View | ViewButton::Reset => None,
        }
    }

    /// Whether the button opens a flyout menu on hover.
    pub fn has_flyout(self) -> bool {
        matches!(
            self,
            ViewButton::View | ViewButton::CurveTrace | ViewButton::VolumeTrace | ViewButton::Slice
        )
    }

    /// Active buttons that keep this button's flyout closed on hover.
    fn hover_blockers(self) -> &'static [ViewButton] {
        match self {
            ViewButton::CurveTrace => &[ViewButton::VolumeTrace, ViewButton::Volume, ViewButton::Slice],
            ViewButton::VolumeTrace => &[ViewButton::CurveTrace, ViewButton::Volume, ViewButton::Slice],
            ViewButton::Slice => &[ViewButton::CurveTrace, ViewButton::Volume, ViewButton::VolumeTrace],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ViewButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// State of the view bar.
#[derive(Debug, Clone)]
pub struct ViewState {
    active_button: Option<ViewButton>,
    hovered_button: Option<ViewButton>,
    slice_active: bool,
    reset_clear_at: Option<Instant>,
    reset_clear_delay: Duration,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::with_reset_delay(DEFAULT_RESET_CLEAR_DELAY)
    }

    /// Creates a view bar whose Reset highlight clears after `delay`.
    pub fn with_reset_delay(delay: Duration) -> Self {
        Self {
            active_button: None,
            hovered_button: None,
            slice_active: false,
            reset_clear_at: None,
            reset_clear_delay: delay,
        }
    }

    // ===== Queries =====

    pub fn active_button(&self) -> Option<ViewButton> {
        self.active_button
    }

    pub fn hovered_button(&self) -> Option<ViewButton> {
        self.hovered_button
    }

    pub fn is_slice_active(&self) -> bool {
        self.slice_active
    }

    /// Whether `button` is drawn in the highlighted style.
    pub fn is_highlighted(&self, button: ViewButton) -> bool {
        if button == ViewButton::Slice {
            self.slice_active
        } else {
            self.active_button == Some(button)
        }
    }

    /// Time at which a pending Reset highlight will be cleared.
    pub fn pending_clear(&self) -> Option<Instant> {
        self.reset_clear_at
    }

    // ===== Mutations =====

    /// Handles a click on `button` at time `now`.
    ///
    /// Returns the commands to send; at most one.
    pub fn click(&mut self, button: ViewButton, now: Instant) -> Vec<RenderCommand> {
        log::info!("{} clicked", button);

        self.active_button = if self.active_button == Some(button) { None } else { Some(button) };

        if button != ViewButton::Slice {
            self.slice_active = false;
        }

        let mut commands = Vec::new();
        match button {
            ViewButton::CurveTrace | ViewButton::VolumeTrace => {
                self.hovered_button = Some(button);
            }
            ViewButton::Volume => {
                self.hovered_button = None;
            }
            ViewButton::View => {
                self.hovered_button = Some(button);
            }
            ViewButton::Slice => {
                self.hovered_button = Some(button);
                self.slice_active = !self.slice_active;
            }
            ViewButton::Reset => {
                self.hovered_button = None;
                self.reset_clear_at = Some(now + self.reset_clear_delay);
                commands.push(RenderCommand::Reset);
            }
        }

        if let Some(mode) = button.render_mode() {
            commands.push(RenderCommand::SetRenderingMode(mode));
        }

        commands
    }

    /// Applies a scheduled Reset clear once its deadline has passed.
    ///
    /// Returns true if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_clear_at {
            Some(deadline) if now >= deadline => {
                self.reset_clear_at = None;
                self.active_button = None;
                true
            }
            _ => false,
        }
    }

    /// Pointer entered `button`.
    pub fn hover_enter(&mut self, button: ViewButton) {
        if !button.has_flyout() {
            return;
        }
        if let Some(active) = self.active_button {
            if button.hover_blockers().contains(&active) {
                return;
            }
        }
        self.hovered_button = Some(button);
    }

    /// Pointer left the flyout of `button`.
    pub fn hover_leave(&mut self, button: ViewButton) {
        if self.hovered_button == Some(button) {
            self.hovered_button = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_codes() {
        assert_eq!(RenderMode::VolumeTrace.code(), 0);
        assert_eq!(RenderMode::CurveTrace.code(), 1);
        assert_eq!(RenderMode::Volume.code(), 2);
        assert_eq!(RenderMode::Slice.code(), 3);
        for code in 0..4 {
            assert_eq!(RenderMode::from_code(code).map(RenderMode::code), Some(code));
        }
        assert_eq!(RenderMode::from_code(-1), None);
    }

    #[test]
    fn test_click_toggles_active() {
        let mut view = ViewState::new();
        let now = Instant::now();

        view.click(ViewButton::Volume, now);
        assert_eq!(view.active_button(), Some(ViewButton::Volume));

        view.click(ViewButton::Volume, now);
        assert_eq!(view.active_button(), None);
    }

    #[test]
    fn test_view_click_sends_nothing() {
        let mut view = ViewState::new();
        assert!(view.click(ViewButton::View, Instant::now()).is_empty());
        assert_eq!(view.active_button(), Some(ViewButton::View));
    }

    #[test]
    fn test_click_closes_other_flyouts() {
        let mut view = ViewState::new();
        let now = Instant::now();

        view.hover_enter(ViewButton::Slice);
        view.click(ViewButton::View, now);
        assert_eq!(view.hovered_button(), Some(ViewButton::View));

        view.click(ViewButton::Reset, now);
        assert_eq!(view.hovered_button(), None);
    }

    #[test]
    fn test_hover_after_click() {
        let mut view = ViewState::new();
        let now = Instant::now();

        view.click(ViewButton::CurveTrace, now);
        assert_eq!(view.hovered_button(), Some(ViewButton::CurveTrace));

        view.click(ViewButton::Volume, now);
        assert_eq!(view.hovered_button(), None);

        view.click(ViewButton::Slice, now);
        assert_eq!(view.hovered_button(), Some(ViewButton::Slice));
    }

    #[test]
    fn test_slice_flag() {
        let mut view = ViewState::new();
        let now = Instant::now();

        view.click(ViewButton::Slice, now);
        assert!(view.is_slice_active());
        assert!(view.is_highlighted(ViewButton::Slice));

        view.click(ViewButton::Slice, now);
        assert!(!view.is_slice_active());

        view.click(ViewButton::Slice, now);
        view.click(ViewButton::Volume, now);
        assert!(!view.is_slice_active());
        assert!(!view.is_highlighted(ViewButton::Slice));
    }

    #[test]
    fn test_hover_blocked_by_other_mode() {
        let mut view = ViewState::new();
        view.click(ViewButton::Volume, Instant::now());

        view.hover_enter(ViewButton::CurveTrace);
        assert_eq!(view.hovered_button(), None);

        view.hover_enter(ViewButton::View);
        assert_eq!(view.hovered_button(), Some(ViewButton::View));
    }

    #[test]
    fn test_hover_allowed_for_own_mode() {
        let mut view = ViewState::new();
        view.click(ViewButton::CurveTrace, Instant::now());
        view.hover_leave(ViewButton::CurveTrace);
        view.hover_enter(ViewButton::CurveTrace);
        assert_eq!(view.hovered_button(), Some(ViewButton::CurveTrace));
    }

    #[test]
    fn test_hover_without_flyout_is_ignored() {
        let mut view = ViewState::new();
        view.hover_enter(ViewButton::Volume);
        assert_eq!(view.hovered_button(), None);
    }

    #[test]
    fn test_hover_leave_only_matching() {
        let mut view = ViewState::new();
        view.hover_enter(ViewButton::View);
        view.hover_leave(ViewButton::Slice);
        assert_eq!(view.hovered_button(), Some(ViewButton::View));
        view.hover_leave(ViewButton::View);
        assert_eq!(view.hovered_button(), None);
    }

    #[test]
    fn test_reset_clears_after_delay() {
        let mut view = ViewState::with_reset_delay(Duration::from_millis(150));
        let t0 = Instant::now();

        let commands = view.click(ViewButton::Reset, t0);
        assert_eq!(commands, vec![RenderCommand::Reset]);
        assert_eq!(view.active_button(), Some(ViewButton::Reset));

        assert!(!view.tick(t0 + Duration::from_millis(100)));
        assert_eq!(view.active_button(), Some(ViewButton::Reset));

        assert!(view.tick(t0 + Duration::from_millis(150)));
        assert_eq!(view.active_button(), None);
        assert_eq!(view.pending_clear(), None);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(ViewButton::from_label("Curve Trace"), Some(ViewButton::CurveTrace));
        assert_eq!(ViewButton::from_label("volume-trace"), Some(ViewButton::VolumeTrace));
        assert_eq!(ViewButton::from_label("SLICE"), Some(ViewButton::Slice));
        assert_eq!(ViewButton::from_label("orbit"), None);
    }
}
