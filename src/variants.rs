//! Vehicle variant selection.
//!
//! Each variant is sent to the backend as an inference id. The ids are the
//! backend's, including the ride height quirk: "High" is sent as 2 even
//! though it is the second value of the concept car's variant set.

use crate::commands::RenderCommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rim {
    #[default]
    Standard,
    Aero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mirrors {
    #[default]
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Spoiler {
    #[default]
    Off,
    On,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RideHeight {
    #[default]
    Standard,
    High,
}

/// One variant change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantChange {
    Rim(Rim),
    Mirrors(Mirrors),
    Spoiler(Spoiler),
    RideHeight(RideHeight),
}

impl VariantChange {
    pub fn request_name(&self) -> &'static str {
        match self {
            VariantChange::Rim(_) => "set_rim_variant",
            VariantChange::Mirrors(_) => "set_mirror_variant",
            VariantChange::Spoiler(_) => "set_spoiler_variant",
            VariantChange::RideHeight(_) => "set_ride_height_variant",
        }
    }

    pub fn inference_id(&self) -> u8 {
        match self {
            VariantChange::Rim(Rim::Standard) => 0,
            VariantChange::Rim(Rim::Aero) => 1,
            VariantChange::Mirrors(Mirrors::On) => 0,
            VariantChange::Mirrors(Mirrors::Off) => 1,
            VariantChange::Spoiler(Spoiler::Off) => 0,
            VariantChange::Spoiler(Spoiler::On) => 1,
            VariantChange::RideHeight(RideHeight::Standard) => 0,
            VariantChange::RideHeight(RideHeight::High) => 2,
        }
    }

    /// Parses `kind=value` as typed on the command line, e.g. `rim=aero`.
    pub fn parse(s: &str) -> Option<Self> {
        let (kind, value) = s.split_once('=')?;
        let value = value.to_ascii_lowercase();
        match (kind.to_ascii_lowercase().as_str(), value.as_str()) {
            ("rim", "standard") => Some(VariantChange::Rim(Rim::Standard)),
            ("rim", "aero") => Some(VariantChange::Rim(Rim::Aero)),
            ("mirrors", "on") => Some(VariantChange::Mirrors(Mirrors::On)),
            ("mirrors", "off") => Some(VariantChange::Mirrors(Mirrors::Off)),
            ("spoiler", "on") => Some(VariantChange::Spoiler(Spoiler::On)),
            ("spoiler", "off") => Some(VariantChange::Spoiler(Spoiler::Off)),
            ("ride_height", "standard") => Some(VariantChange::RideHeight(RideHeight::Standard)),
            ("ride_height", "high") => Some(VariantChange::RideHeight(RideHeight::High)),
            _ => None,
        }
    }
}

/// Currently selected variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VehicleVariants {
    pub rim: Rim,
    pub mirrors: Mirrors,
    pub spoiler: Spoiler,
    pub ride_height: RideHeight,
}

impl VehicleVariants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a change; returns the command to send if anything changed.
    pub fn apply(&mut self, change: VariantChange) -> Option<RenderCommand> {
        let changed = match change {
            VariantChange::Rim(v) => std::mem::replace(&mut self.rim, v) != v,
            VariantChange::Mirrors(v) => std::mem::replace(&mut self.mirrors, v) != v,
            VariantChange::Spoiler(v) => std::mem::replace(&mut self.spoiler, v) != v,
            VariantChange::RideHeight(v) => std::mem::replace(&mut self.ride_height, v) != v,
        };
        changed.then_some(RenderCommand::SetVariant(change))
    }

    /// Combined variant index used by the inference service.
    pub fn variant_index(&self) -> u32 {
        let mirror = VariantChange::Mirrors(self.mirrors).inference_id() as u32;
        let spoiler = VariantChange::Spoiler(self.spoiler).inference_id() as u32;
        let rim = VariantChange::Rim(self.rim).inference_id() as u32;
        let ride_height = match self.ride_height {
            RideHeight::Standard => 0,
            RideHeight::High => 1,
        };
        mirror + 2 * spoiler + 4 * rim + 8 * ride_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let v = VehicleVariants::new();
        assert_eq!(v.rim, Rim::Standard);
        assert_eq!(v.mirrors, Mirrors::On);
        assert_eq!(v.spoiler, Spoiler::Off);
        assert_eq!(v.ride_height, RideHeight::Standard);
        assert_eq!(v.variant_index(), 0);
    }

    #[test]
    fn test_apply_sends_once() {
        let mut v = VehicleVariants::new();
        let change = VariantChange::Spoiler(Spoiler::On);
        assert_eq!(v.apply(change), Some(RenderCommand::SetVariant(change)));
        assert_eq!(v.apply(change), None);
        assert_eq!(v.spoiler, Spoiler::On);
    }

    #[test]
    fn test_variant_index() {
        let v = VehicleVariants {
            rim: Rim::Aero,
            mirrors: Mirrors::Off,
            spoiler: Spoiler::On,
            ride_height: RideHeight::High,
        };
        assert_eq!(v.variant_index(), 15);
    }

    #[test]
    fn test_parse() {
        assert_eq!(VariantChange::parse("rim=aero"), Some(VariantChange::Rim(Rim::Aero)));
        assert_eq!(
            VariantChange::parse("ride_height=HIGH"),
            Some(VariantChange::RideHeight(RideHeight::High))
        );
        assert_eq!(VariantChange::parse("rim"), None);
        assert_eq!(VariantChange::parse("wheels=big"), None);
    }
}
