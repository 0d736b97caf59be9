//! # Unit Data Extraction
//!
//! Reads the inputs belonging to one unit and produces a [`UnitRecord`].
//! Extraction never fails: blank, malformed, non-finite or negative numbers
//! all become 0, and a gated load whose toggle is off is 0 whatever its
//! input still holds.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::extract::extract_unit;
//! use loadcalc_core::form::FormState;
//! use loadcalc_core::units::UnitTag;
//!
//! let sfd = UnitTag::new("SFD");
//! let mut form = FormState::standard(&[sfd.clone()]);
//! form.set_value("livingArea_SFD", "140.5");
//! form.set_value("acWatts_SFD", "4000"); // toggle still off
//!
//! let record = extract_unit(&form, &sfd);
//! assert_eq!(record.area_m2, 140.5);
//! assert_eq!(record.air_conditioning, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::form::FormState;
use crate::units::{OptionalLoad, UnitTag};

/// Normalized inputs of one unit, as sent to the calculation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Living area (m²)
    pub area_m2: f64,
    /// Electric space heating (W)
    pub space_heating: f64,
    /// Air conditioning (W)
    pub air_conditioning: f64,
    pub heating_cooling_interlocked: bool,
    /// Electric range rating (whole W)
    pub range_watts: u64,
    /// Sum of additional line items above 1500 W
    pub additional_load: f64,
    pub tankless_watts: f64,
    pub steamer_watts: f64,
    pub pool_hot_tub_watts: f64,
    pub ev_charging_watts: f64,
}

/// Parse a raw input as a non-negative float, 0 on anything else.
///
/// ```rust
/// use loadcalc_core::extract::parse_number;
///
/// assert_eq!(parse_number(Some(" 12.5 ")), 12.5);
/// assert_eq!(parse_number(Some("abc")), 0.0);
/// assert_eq!(parse_number(Some("NaN")), 0.0);
/// assert_eq!(parse_number(None), 0.0);
/// ```
pub fn parse_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Parse a raw input as a non-negative integer, 0 on anything else.
///
/// Decimal input truncates toward zero.
///
/// ```rust
/// use loadcalc_core::extract::parse_integer;
///
/// assert_eq!(parse_integer(Some("12000")), 12000);
/// assert_eq!(parse_integer(Some("12000.9")), 12000);
/// assert_eq!(parse_integer(Some("-5")), 0);
/// assert_eq!(parse_integer(Some("")), 0);
/// ```
pub fn parse_integer(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return value;
    }
    match raw.parse::<f64>() {
        // Saturating cast; the range check keeps NaN and negatives out
        Ok(value) if value.is_finite() && value >= 1.0 => value.trunc() as u64,
        _ => 0,
    }
}

/// Value of a toggle-gated float input; 0 when the toggle is off
fn gated_number(form: &FormState, load: OptionalLoad, unit: &UnitTag) -> f64 {
    if form.is_target_enabled(&load.group_id(unit)) {
        parse_number(form.value(&load.input_name(unit)))
    } else {
        0.0
    }
}

/// Build the record for `unit` from the current form state.
pub fn extract_unit(form: &FormState, unit: &UnitTag) -> UnitRecord {
    let range_watts = if form.is_target_enabled(&OptionalLoad::Range.group_id(unit)) {
        parse_integer(form.value(&OptionalLoad::Range.input_name(unit)))
    } else {
        0
    };

    let record = UnitRecord {
        area_m2: parse_number(form.value(&unit.living_area_input())),
        space_heating: gated_number(form, OptionalLoad::SpaceHeating, unit),
        air_conditioning: gated_number(form, OptionalLoad::AirConditioning, unit),
        heating_cooling_interlocked: form.interlock(unit).unwrap_or(false),
        range_watts,
        additional_load: form
            .additional_loads(unit)
            .map(|table| table.qualifying_total())
            .unwrap_or(0.0),
        tankless_watts: gated_number(form, OptionalLoad::Tankless, unit),
        steamer_watts: gated_number(form, OptionalLoad::Steamer, unit),
        pool_hot_tub_watts: gated_number(form, OptionalLoad::PoolHotTub, unit),
        ev_charging_watts: gated_number(form, OptionalLoad::EvCharging, unit),
    };
    log::debug!("Extracted unit {}: {:?}", unit, record);
    record
}
