//! # Calculation Request
//!
//! The payload sent to the calculation service. `num_units` is always the
//! length of `units`: the fields are private and the only constructors
//! derive the count from the list.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::form::FormState;
//! use loadcalc_core::request::CalculationRequest;
//! use loadcalc_core::units::UnitTag;
//!
//! let units = [UnitTag::new("SFD"), UnitTag::new("SS")];
//! let form = FormState::standard(&units);
//!
//! let request = CalculationRequest::build(&form, &units, "Aluminum");
//! assert_eq!(request.num_units(), 2);
//! assert_eq!(request.conductor_type(), "Aluminum");
//! ```

use serde::Serialize;

use crate::extract::{extract_unit, UnitRecord};
use crate::form::FormState;
use crate::units::UnitTag;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    num_units: usize,
    units: Vec<UnitRecord>,
    conductor_type: String,
}

impl CalculationRequest {
    pub fn new(units: Vec<UnitRecord>, conductor_type: impl Into<String>) -> Self {
        CalculationRequest {
            num_units: units.len(),
            units,
            conductor_type: conductor_type.into(),
        }
    }

    /// Extract each tag in order and assemble the request.
    pub fn build(form: &FormState, tags: &[UnitTag], conductor_type: &str) -> Self {
        let units = tags.iter().map(|tag| extract_unit(form, tag)).collect();
        CalculationRequest::new(units, conductor_type)
    }

    /// Request for the units currently selected on the form and its conductor choice.
    pub fn from_form(form: &FormState) -> Self {
        CalculationRequest::build(form, &form.selected_units(), &form.conductor_type)
    }

    pub fn num_units(&self) -> usize {
        self.num_units
    }

    pub fn units(&self) -> &[UnitRecord] {
        &self.units
    }

    pub fn conductor_type(&self) -> &str {
        &self.conductor_type
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
