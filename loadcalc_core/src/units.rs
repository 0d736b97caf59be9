//! # Units and Optional Loads
//!
//! A "unit" is one dwelling sub-entity (a house, a secondary suite, a
//! laneway house) whose loads are entered and calculated independently.
//! Every per-unit control on the page is addressed by a name that ends in
//! `_<TAG>`, where `<TAG>` is the unit's tag.
//!
//! ## Naming Scheme
//!
//! ```text
//! livingArea_SFD                 living area input
//! electricHeatingLoadGroup_SFD   region shown by the space heating toggle
//! electricHeatingWatts_SFD       space heating wattage input
//! ```
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::units::{OptionalLoad, UnitTag};
//!
//! let sfd = UnitTag::new("SFD");
//! assert_eq!(OptionalLoad::SpaceHeating.group_id(&sfd), "electricHeatingLoadGroup_SFD");
//! assert_eq!(OptionalLoad::SpaceHeating.input_name(&sfd), "electricHeatingWatts_SFD");
//! assert_eq!(UnitTag::living_area_input(&sfd), "livingArea_SFD");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag identifying one unit on the page (e.g. "SFD").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitTag(pub String);

impl UnitTag {
    /// Single family dwelling
    pub const SFD: &'static str = "SFD";
    /// Secondary suite
    pub const SS: &'static str = "SS";
    /// Laneway house
    pub const LWH: &'static str = "LWH";

    /// Tags of the units the standard form offers, in page order.
    pub const STANDARD: [&'static str; 3] = [Self::SFD, Self::SS, Self::LWH];

    pub fn new(tag: impl Into<String>) -> Self {
        UnitTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label for the standard tags; other tags echo themselves.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            Self::SFD => "Single Family Dwelling",
            Self::SS => "Secondary Suite",
            Self::LWH => "Laneway House",
            other => other,
        }
    }

    /// Name of the living area input for this unit
    pub fn living_area_input(&self) -> String {
        scoped("livingArea", self)
    }

    /// Region holding this unit's inputs
    pub fn section_id(&self) -> String {
        scoped("unitSection", self)
    }
}

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitTag {
    fn from(tag: &str) -> Self {
        UnitTag::new(tag)
    }
}

/// Optional load sections a unit can enable.
///
/// Each section has a toggle whose target region holds the wattage input;
/// when the toggle is off the load is zero no matter what the input says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionalLoad {
    /// Electric space heating
    SpaceHeating,
    /// Air conditioning
    AirConditioning,
    /// Electric range (entered as whole watts)
    Range,
    /// Tankless water heater
    Tankless,
    /// Steamer
    Steamer,
    /// Pool or hot tub
    PoolHotTub,
    /// EV charging equipment
    EvCharging,
}

impl OptionalLoad {
    /// All optional loads in page order
    pub const ALL: [OptionalLoad; 7] = [
        OptionalLoad::SpaceHeating,
        OptionalLoad::AirConditioning,
        OptionalLoad::Range,
        OptionalLoad::Tankless,
        OptionalLoad::Steamer,
        OptionalLoad::PoolHotTub,
        OptionalLoad::EvCharging,
    ];

    fn group_prefix(&self) -> &'static str {
        match self {
            OptionalLoad::SpaceHeating => "electricHeatingLoadGroup",
            OptionalLoad::AirConditioning => "acLoadGroup",
            OptionalLoad::Range => "rangeLoadGroup",
            OptionalLoad::Tankless => "tanklessLoadGroup",
            OptionalLoad::Steamer => "steamerLoadGroup",
            OptionalLoad::PoolHotTub => "poolLoadGroup",
            OptionalLoad::EvCharging => "evLoadGroup",
        }
    }

    fn input_prefix(&self) -> &'static str {
        match self {
            OptionalLoad::SpaceHeating => "electricHeatingWatts",
            OptionalLoad::AirConditioning => "acWatts",
            OptionalLoad::Range => "rangeWatts",
            OptionalLoad::Tankless => "tanklessWatts",
            OptionalLoad::Steamer => "steamersWatts",
            OptionalLoad::PoolHotTub => "poolHotTubWatts",
            OptionalLoad::EvCharging => "evChargingWatts",
        }
    }

    /// Id of the region this load's toggle shows and hides
    pub fn group_id(&self, unit: &UnitTag) -> String {
        scoped(self.group_prefix(), unit)
    }

    /// Name of the wattage input inside the region
    pub fn input_name(&self, unit: &UnitTag) -> String {
        scoped(self.input_prefix(), unit)
    }
}

fn scoped(prefix: &str, unit: &UnitTag) -> String {
    format!("{}_{}", prefix, unit.0)
}
