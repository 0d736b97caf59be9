//! # Form State
//!
//! `FormState` is an explicit, serializable snapshot of every input control
//! on the page: unit selectors, load toggles, named value inputs, interlock
//! checkboxes, additional-load tables and the conductor selection. The page
//! front end writes user edits into it; the extractor only ever reads it.
//!
//! ## Structure
//!
//! ```text
//! FormState
//! ├── conductor_type: String
//! ├── unit_selectors: Vec<UnitSelector>   (page order)
//! ├── toggles: Vec<Toggle>                 (id -> target region)
//! ├── inputs: BTreeMap<name, raw value>
//! ├── interlocks: BTreeMap<UnitTag, bool>
//! └── additional_loads: BTreeMap<UnitTag, AdditionalLoadTable>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::form::FormState;
//! use loadcalc_core::units::UnitTag;
//!
//! let mut form = FormState::standard(&[UnitTag::new("SFD")]);
//! form.set_value("livingArea_SFD", "120");
//! assert_eq!(form.value("livingArea_SFD"), Some("120"));
//! assert!(form.selected_units().is_empty());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rows::AdditionalLoadTable;
use crate::units::{OptionalLoad, UnitTag};

/// Conductor material selected when the form first loads
pub const DEFAULT_CONDUCTOR_TYPE: &str = "Copper";

/// A checkbox bound to one target region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    pub id: String,
    /// Region shown while the toggle is checked
    pub target: String,
    #[serde(default)]
    pub checked: bool,
}

impl Toggle {
    /// Id of the toggle that enables `load` for `unit` on the standard form
    pub fn standard_id(load: OptionalLoad, unit: &UnitTag) -> String {
        format!("{}-toggle", load.group_id(unit))
    }
}

/// A checkbox that selects a unit for calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelector {
    pub id: String,
    /// Unit tag carried as the checkbox value
    pub unit: UnitTag,
    #[serde(default)]
    pub checked: bool,
}

/// Snapshot of all user-editable controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default = "default_conductor_type")]
    pub conductor_type: String,

    #[serde(default)]
    pub unit_selectors: Vec<UnitSelector>,

    #[serde(default)]
    pub toggles: Vec<Toggle>,

    /// Raw text of every named input, exactly as typed
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,

    /// Heating/cooling interlock checkbox per unit
    #[serde(default)]
    pub interlocks: BTreeMap<UnitTag, bool>,

    /// Additional-load area per unit
    #[serde(default)]
    pub additional_loads: BTreeMap<UnitTag, AdditionalLoadTable>,
}

fn default_conductor_type() -> String {
    DEFAULT_CONDUCTOR_TYPE.to_string()
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            conductor_type: default_conductor_type(),
            unit_selectors: Vec::new(),
            toggles: Vec::new(),
            inputs: BTreeMap::new(),
            interlocks: BTreeMap::new(),
            additional_loads: BTreeMap::new(),
        }
    }
}

impl FormState {
    /// Blank standard form offering the given units.
    ///
    /// Every control starts unchecked and every input empty.
    pub fn standard(units: &[UnitTag]) -> Self {
        let mut form = FormState::default();
        for unit in units {
            form.unit_selectors.push(UnitSelector {
                id: format!("unitToggle_{}", unit),
                unit: unit.clone(),
                checked: false,
            });
            form.inputs.insert(unit.living_area_input(), String::new());
            for load in OptionalLoad::ALL {
                form.toggles.push(Toggle {
                    id: Toggle::standard_id(load, unit),
                    target: load.group_id(unit),
                    checked: false,
                });
                form.inputs.insert(load.input_name(unit), String::new());
            }
            form.interlocks.insert(unit.clone(), false);
            form.additional_loads.insert(unit.clone(), AdditionalLoadTable::default());
        }
        form
    }

    /// Units offered by the form's selectors, in page order, without repeats
    pub fn offered_units(&self) -> Vec<UnitTag> {
        let mut units: Vec<UnitTag> = Vec::new();
        for selector in &self.unit_selectors {
            if !units.contains(&selector.unit) {
                units.push(selector.unit.clone());
            }
        }
        units
    }

    /// Tags of the checked unit selectors, in page order.
    ///
    /// Each checked selector contributes one entry, so two checked selectors
    /// carrying the same tag select that unit twice.
    pub fn selected_units(&self) -> Vec<UnitTag> {
        self.unit_selectors
            .iter()
            .filter(|s| s.checked)
            .map(|s| s.unit.clone())
            .collect()
    }

    /// Whether any checked selector carries `unit`
    pub fn is_unit_selected(&self, unit: &UnitTag) -> bool {
        self.unit_selectors.iter().any(|s| s.checked && &s.unit == unit)
    }

    /// Check or uncheck a unit selector. Returns false if no such selector.
    pub fn set_unit_selected(&mut self, id: &str, checked: bool) -> bool {
        match self.unit_selectors.iter_mut().find(|s| s.id == id) {
            Some(selector) => {
                selector.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&self, id: &str) -> Option<&Toggle> {
        self.toggles.iter().find(|t| t.id == id)
    }

    /// Check or uncheck a toggle. Returns false if no such toggle.
    pub fn set_toggle(&mut self, id: &str, checked: bool) -> bool {
        match self.toggles.iter_mut().find(|t| t.id == id) {
            Some(toggle) => {
                toggle.checked = checked;
                true
            }
            None => false,
        }
    }

    /// State of the first toggle bound to `target`; None if nothing targets it
    pub fn target_toggle_state(&self, target: &str) -> Option<bool> {
        self.toggles.iter().find(|t| t.target == target).map(|t| t.checked)
    }

    /// Whether the section at `target` is switched on. Absent toggles read as off.
    pub fn is_target_enabled(&self, target: &str) -> bool {
        self.target_toggle_state(target).unwrap_or(false)
    }

    /// Raw value of a named input; None if the input does not exist
    pub fn value(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    /// Set the raw value of a named input, creating it if needed
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(name.into(), value.into());
    }

    /// Interlock checkbox for `unit`; None if the unit has no interlock control
    pub fn interlock(&self, unit: &UnitTag) -> Option<bool> {
        self.interlocks.get(unit).copied()
    }

    /// Set the interlock checkbox. Returns false if the unit has no interlock control.
    pub fn set_interlock(&mut self, unit: &UnitTag, checked: bool) -> bool {
        match self.interlocks.get_mut(unit) {
            Some(value) => {
                *value = checked;
                true
            }
            None => false,
        }
    }

    pub fn additional_loads(&self, unit: &UnitTag) -> Option<&AdditionalLoadTable> {
        self.additional_loads.get(unit)
    }

    pub fn additional_loads_mut(&mut self, unit: &UnitTag) -> Option<&mut AdditionalLoadTable> {
        self.additional_loads.get_mut(unit)
    }
}
