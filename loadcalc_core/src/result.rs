//! # Calculation Result
//!
//! Response body of the calculation service. The service carries no field
//! saying whether the result is single-unit or multi-unit; the shape follows
//! from how many entries `units` holds (see [`CalculationResult::shape`]).
//!
//! Sizing fields are display-only and may arrive as text (`"100A"`), as a
//! number or as `null`, so they decode into [`FieldValue`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown for a sizing field the service left empty
pub const NOT_AVAILABLE: &str = "N/A";

/// A loosely typed display value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Render an optional field, falling back to [`NOT_AVAILABLE`]
pub fn display_field(value: &Option<FieldValue>) -> String {
    value
        .as_ref()
        .map(FieldValue::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Per-unit entry of a multi-unit result.
///
/// Aliases accept the field names the reference service emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResult {
    #[serde(default)]
    pub unit_index: Option<u32>,
    #[serde(default)]
    pub area_m2: Option<f64>,
    #[serde(default, alias = "calculated_load")]
    pub total_unit_load_watts: Option<f64>,
    pub unit_amps: f64,
    #[serde(default, alias = "unit_ocp")]
    pub unit_panel_ocp_size: Option<FieldValue>,
    #[serde(default, alias = "unit_conductor")]
    pub unit_panel_conductor: Option<FieldValue>,
}

/// Decoded success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(rename = "Total Calculated Load (Watts)")]
    pub total_load_watts: f64,

    #[serde(rename = "Total Amps")]
    pub total_amps: f64,

    #[serde(rename = "Service OCP size (Amps)", default)]
    pub service_ocp_size: Option<FieldValue>,

    #[serde(rename = "Service Conductor Type and Size", default)]
    pub service_conductor: Option<FieldValue>,

    #[serde(default)]
    pub units: Option<Vec<UnitResult>>,

    #[serde(rename = "Combined No-HVAC Load (Watts)", default, skip_serializing_if = "Option::is_none")]
    pub combined_no_hvac_watts: Option<f64>,

    #[serde(rename = "Total HVAC Load (Watts)", default, skip_serializing_if = "Option::is_none")]
    pub total_hvac_watts: Option<f64>,
}

/// Shape inferred from the per-unit list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    SingleUnit,
    MultiUnit,
}

impl CalculationResult {
    /// Number of per-unit entries (0 when the list is absent)
    pub fn unit_count(&self) -> usize {
        self.units.as_ref().map_or(0, Vec::len)
    }

    /// Multi-unit iff the list has more than one entry.
    pub fn shape(&self) -> ResultShape {
        if self.unit_count() > 1 {
            ResultShape::MultiUnit
        } else {
            ResultShape::SingleUnit
        }
    }
}

impl ResultShape {
    /// Shape a service should answer with for `num_units` submitted units
    pub fn expected_for(num_units: usize) -> Self {
        if num_units > 1 {
            ResultShape::MultiUnit
        } else {
            ResultShape::SingleUnit
        }
    }
}
