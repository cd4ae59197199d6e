//! Gradient (colormap domain) sliders.
//!
//! The range slider works in normalized scalars in [0, 1]. On commit the pair
//! is mapped into the physical range of the selected attribute and sent as
//! `set_gradient_scale`. The mapping is linear and differs per attribute:
//!
//! | attribute          | min_val               | max_val              |
//! |--------------------|-----------------------|----------------------|
//! | Velocity Magnitude | `145 * s_min`         | `145 * s_max`        |
//! | Pressure           | `-2000 * (1 - s_min)` | `1000 * (1 - s_max)` |
//!
//! Scalars are clamped to [0, 1]; a NaN scalar keeps its previous value.
//! Nothing enforces `min <= max`.

use crate::commands::RenderCommand;
use crate::controls::clamp_or_keep;

/// Upper end of the velocity colormap in m/s.
pub const VELOCITY_RANGE: f64 = 145.0;
/// Pressure colormap lower end at scalar 0.
pub const PRESSURE_MIN: f64 = -2000.0;
/// Pressure colormap upper end at scalar 0.
pub const PRESSURE_MAX: f64 = 1000.0;

/// Field rendered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Attribute {
    VelocityMagnitude,
    Pressure,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::VelocityMagnitude, Attribute::Pressure];

    pub fn label(self) -> &'static str {
        match self {
            Attribute::VelocityMagnitude => "Velocity Magnitude",
            Attribute::Pressure => "Pressure",
        }
    }

    /// Code understood by `set_visualization_attribute_state`.
    pub fn code(self) -> i32 {
        match self {
            Attribute::VelocityMagnitude => 0,
            Attribute::Pressure => 1,
        }
    }

    /// Legend tick spacing in physical units.
    pub fn tick_interval(self) -> f64 {
        match self {
            Attribute::VelocityMagnitude => 20.0,
            Attribute::Pressure => 300.0,
        }
    }

    /// Maps a normalized slider pair to the physical colormap domain.
    pub fn map_range(self, min_scalar: f64, max_scalar: f64) -> (f64, f64) {
        match self {
            Attribute::VelocityMagnitude => (min_scalar * VELOCITY_RANGE, max_scalar * VELOCITY_RANGE),
            Attribute::Pressure => (
                PRESSURE_MIN * (1.0 - min_scalar),
                PRESSURE_MAX * (1.0 - max_scalar),
            ),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized (min, max) slider pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScalarRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScalarRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Attribute selection plus one slider pair per attribute family.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientState {
    selected: Attribute,
    velocity: ScalarRange,
    other: ScalarRange,
}

impl Default for GradientState {
    fn default() -> Self {
        Self::new()
    }
}

impl GradientState {
    pub fn new() -> Self {
        Self {
            selected: Attribute::VelocityMagnitude,
            velocity: ScalarRange::default(),
            other: ScalarRange::default(),
        }
    }

    pub fn selected(&self) -> Attribute {
        self.selected
    }

    /// Slider pair of the selected attribute.
    pub fn scalars(&self) -> ScalarRange {
        match self.selected {
            Attribute::VelocityMagnitude => self.velocity,
            _ => self.other,
        }
    }

    fn scalars_mut(&mut self) -> &mut ScalarRange {
        match self.selected {
            Attribute::VelocityMagnitude => &mut self.velocity,
            _ => &mut self.other,
        }
    }

    /// Physical colormap domain for the selected attribute.
    pub fn physical_range(&self) -> (f64, f64) {
        let s = self.scalars();
        self.selected.map_range(s.min, s.max)
    }

    /// Changes the rendered attribute.
    ///
    /// Returns the command to send, or None if it was already selected.
    pub fn select(&mut self, attribute: Attribute) -> Option<RenderCommand> {
        if self.selected == attribute {
            return None;
        }
        self.selected = attribute;
        Some(RenderCommand::SetVisualizationAttribute(attribute))
    }

    /// Updates the slider pair while dragging; nothing is sent.
    pub fn drag(&mut self, min_scalar: f64, max_scalar: f64) {
        let scalars = self.scalars_mut();
        *scalars = ScalarRange {
            min: clamp_or_keep(min_scalar, 0.0, 1.0, scalars.min),
            max: clamp_or_keep(max_scalar, 0.0, 1.0, scalars.max),
        };
    }

    /// Commits the slider pair and returns the `set_gradient_scale` command.
    pub fn commit(&mut self, min_scalar: f64, max_scalar: f64) -> RenderCommand {
        self.drag(min_scalar, max_scalar);
        let (min_val, max_val) = self.physical_range();
        RenderCommand::SetGradientScale { min_val, max_val }
    }

    /// Legend tick values for the current range.
    pub fn ticks(&self) -> Vec<f64> {
        let (min_val, max_val) = self.physical_range();
        gradient_ticks(min_val, max_val, self.selected.tick_interval())
    }
}

/// Multiples of `interval` lying between `a` and `b` (in either order),
/// ascending.
pub fn gradient_ticks(a: f64, b: f64, interval: f64) -> Vec<f64> {
    if interval.is_nan() || interval <= 0.0 || !a.is_finite() || !b.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let first = (lo / interval).ceil() as i64;
    let last = (hi / interval).floor() as i64;
    (first..=last).map(|k| k as f64 * interval).collect()
}
