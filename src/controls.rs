//! Scalar controls forwarded to the renderer: wind speed and the
//! parameters of the curve-trace, volume-trace and slice flyouts.
//!
//! Positions are expressed as percentages of the backend's slider bounds,
//! each component in [-1, 1]. Values are clamped here; the backend does not
//! validate them. A NaN input leaves the previous value in place, since it
//! would otherwise be serialized as `null`.

use crate::commands::RenderCommand;

pub const WIND_SPEED_MIN: f64 = 0.0;
pub const WIND_SPEED_MAX: f64 = 100.0;
pub const DEFAULT_WIND_SPEED: f64 = 75.0;
/// Point scale sent with a committed speed change.
pub const COMMIT_POINT_SCALE: f64 = 1.0;

pub const DEFAULT_STREAMLINE_POS: [f64; 3] = [-1.0, 0.0, 0.0];
pub const DEFAULT_STREAMLINE_RADIUS: f64 = 0.5;
pub const DEFAULT_SMOKE_PROBE_POS: [f64; 3] = [0.0, -1.0, -1.0];
pub const DEFAULT_SLICE_POS: f64 = 0.0;

/// Clamps `value` into `[lo, hi]`, keeping `previous` when `value` is NaN.
pub(crate) fn clamp_or_keep(value: f64, lo: f64, hi: f64, previous: f64) -> f64 {
    if value.is_nan() {
        previous
    } else {
        value.clamp(lo, hi)
    }
}

fn clamp_pct(v: f64, previous: f64) -> f64 {
    clamp_or_keep(v, -1.0, 1.0, previous)
}

fn clamp_pos(pos: [f64; 3], previous: [f64; 3]) -> [f64; 3] {
    [
        clamp_pct(pos[0], previous[0]),
        clamp_pct(pos[1], previous[1]),
        clamp_pct(pos[2], previous[2]),
    ]
}

/// Wind speed slider (0..=100, integer steps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSpeed {
    value: f64,
}

impl Default for WindSpeed {
    fn default() -> Self {
        Self { value: DEFAULT_WIND_SPEED }
    }
}

impl WindSpeed {
    pub fn new(value: f64) -> Self {
        Self { value: Self::snap(value, DEFAULT_WIND_SPEED) }
    }

    fn snap(value: f64, previous: f64) -> f64 {
        clamp_or_keep(value.round(), WIND_SPEED_MIN, WIND_SPEED_MAX, previous)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Updates the displayed speed while dragging; nothing is sent.
    pub fn drag(&mut self, value: f64) {
        self.value = Self::snap(value, self.value);
    }

    /// Commits the speed and returns `set_wind_speed`.
    pub fn commit(&mut self, value: f64) -> RenderCommand {
        self.drag(value);
        RenderCommand::SetWindSpeed { speed: self.value, point_scale: COMMIT_POINT_SCALE }
    }
}

/// Curve trace seed sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveTraceParams {
    position: [f64; 3],
    radius: f64,
}

impl Default for CurveTraceParams {
    fn default() -> Self {
        Self { position: DEFAULT_STREAMLINE_POS, radius: DEFAULT_STREAMLINE_RADIUS }
    }
}

impl CurveTraceParams {
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_position(&mut self, position: [f64; 3]) -> RenderCommand {
        self.position = clamp_pos(position, self.position);
        RenderCommand::SetStreamlinesPos(self.position)
    }

    pub fn set_radius(&mut self, radius: f64) -> RenderCommand {
        self.radius = clamp_or_keep(radius, 0.0, 1.0, self.radius);
        RenderCommand::SetStreamlinesRadius(self.radius)
    }
}

/// Volume trace (smoke probe) emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeTraceParams {
    position: [f64; 3],
}

impl Default for VolumeTraceParams {
    fn default() -> Self {
        Self { position: DEFAULT_SMOKE_PROBE_POS }
    }
}

impl VolumeTraceParams {
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    pub fn set_position(&mut self, position: [f64; 3]) -> RenderCommand {
        self.position = clamp_pos(position, self.position);
        RenderCommand::SetSmokeprobesPos(self.position)
    }
}

/// Axis of the slicing plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceAxis {
    X,
    Y,
    Z,
}

impl SliceAxis {
    pub const ALL: [SliceAxis; 3] = [SliceAxis::X, SliceAxis::Y, SliceAxis::Z];

    pub fn as_str(self) -> &'static str {
        match self {
            SliceAxis::X => "X",
            SliceAxis::Y => "Y",
            SliceAxis::Z => "Z",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "X" | "x" => Some(SliceAxis::X),
            "Y" | "y" => Some(SliceAxis::Y),
            "Z" | "z" => Some(SliceAxis::Z),
            _ => None,
        }
    }
}

/// Slice flyout: selected axis and position along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceParams {
    axis: SliceAxis,
    position: f64,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self { axis: SliceAxis::X, position: DEFAULT_SLICE_POS }
    }
}

impl SliceParams {
    pub fn axis(&self) -> SliceAxis {
        self.axis
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Selects an axis. The backend recenters the plane when the axis
    /// changes, so the local position follows.
    pub fn select_axis(&mut self, axis: SliceAxis) -> Option<RenderCommand> {
        if self.axis == axis {
            return None;
        }
        self.axis = axis;
        self.position = DEFAULT_SLICE_POS;
        Some(RenderCommand::SetSliceState(axis))
    }

    pub fn set_position(&mut self, position: f64) -> RenderCommand {
        self.position = clamp_pct(position, self.position);
        RenderCommand::SetSlicePos(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_speed_commit() {
        let mut speed = WindSpeed::default();
        assert_eq!(speed.value(), 75.0);
        speed.drag(42.4);
        assert_eq!(speed.value(), 42.0);
        assert_eq!(
            speed.commit(60.0),
            RenderCommand::SetWindSpeed { speed: 60.0, point_scale: 1.0 }
        );
    }

    #[test]
    fn test_wind_speed_clamped() {
        assert_eq!(WindSpeed::new(150.0).value(), 100.0);
        assert_eq!(WindSpeed::new(-3.0).value(), 0.0);
    }

    #[test]
    fn test_curve_trace_clamps() {
        let mut curve = CurveTraceParams::default();
        assert_eq!(curve.set_position([2.0, -0.5, -3.0]), RenderCommand::SetStreamlinesPos([1.0, -0.5, -1.0]));
        assert_eq!(curve.set_radius(1.5), RenderCommand::SetStreamlinesRadius(1.0));
    }

    #[test]
    fn test_nan_keeps_previous_value() {
        let mut speed = WindSpeed::default();
        assert_eq!(
            speed.commit(f64::NAN),
            RenderCommand::SetWindSpeed { speed: 75.0, point_scale: 1.0 }
        );
        assert_eq!(WindSpeed::new(f64::NAN).value(), 75.0);

        let mut curve = CurveTraceParams::default();
        assert_eq!(
            curve.set_position([f64::NAN, 0.5, f64::INFINITY]),
            RenderCommand::SetStreamlinesPos([-1.0, 0.5, 1.0])
        );
        assert_eq!(curve.set_radius(f64::NAN), RenderCommand::SetStreamlinesRadius(0.5));

        let mut slice = SliceParams::default();
        slice.set_position(0.3);
        assert_eq!(slice.set_position(f64::NAN), RenderCommand::SetSlicePos(0.3));
        assert_eq!(slice.set_position(f64::NEG_INFINITY), RenderCommand::SetSlicePos(-1.0));
    }

    #[test]
    fn test_volume_trace_default() {
        let probes = VolumeTraceParams::default();
        assert_eq!(probes.position(), [0.0, -1.0, -1.0]);
    }

    #[test]
    fn test_slice_axis_change_recenters() {
        let mut slice = SliceParams::default();
        slice.set_position(0.4);
        assert_eq!(slice.select_axis(SliceAxis::X), None);
        assert_eq!(slice.select_axis(SliceAxis::Z), Some(RenderCommand::SetSliceState(SliceAxis::Z)));
        assert_eq!(slice.position(), 0.0);
    }

    #[test]
    fn test_slice_axis_parse() {
        assert_eq!(SliceAxis::parse("y"), Some(SliceAxis::Y));
        assert_eq!(SliceAxis::parse("clear"), None);
    }
}
