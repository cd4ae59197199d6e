//! Parameters mirrored to the render backend.
//!
//! Everything here is the panel's local copy; the backend never reports its
//! own values back, so these only change through user input.

use rtwt::{
    CurveTraceParams, GradientState, SliceParams, VehicleVariants, ViewState, VolumeTraceParams, WindSpeed,
};
use std::time::Duration;

/// Backend-facing state of the panel.
#[derive(Debug, Clone)]
pub struct SceneState {
    /// View button bar and its flyout menus
    pub view: ViewState,

    /// Inflow speed slider
    pub speed: WindSpeed,

    /// Colormap attribute and range
    pub gradient: GradientState,

    /// Curve trace seed sphere
    pub curve_trace: CurveTraceParams,

    /// Volume trace probe
    pub volume_trace: VolumeTraceParams,

    /// Slicing plane
    pub slice: SliceParams,

    /// Vehicle variants
    pub variants: VehicleVariants,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::with_reset_delay(rtwt::DEFAULT_RESET_CLEAR_DELAY)
    }

    /// Creates scene state whose Reset highlight clears after `delay`.
    pub fn with_reset_delay(delay: Duration) -> Self {
        Self {
            view: ViewState::with_reset_delay(delay),
            speed: WindSpeed::default(),
            gradient: GradientState::new(),
            curve_trace: CurveTraceParams::default(),
            volume_trace: VolumeTraceParams::default(),
            slice: SliceParams::default(),
            variants: VehicleVariants::new(),
        }
    }
}
