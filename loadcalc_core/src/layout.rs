//! # Page Layout
//!
//! Declarative structure of the page: which display regions exist and which
//! region belongs to which unit. Toggle-to-region bindings travel with the
//! toggles themselves (see [`crate::form::Toggle`]).

use serde::{Deserialize, Serialize};

use crate::form::FormState;
use crate::units::UnitTag;

/// A region shown only while its unit is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSection {
    pub region: String,
    pub unit: UnitTag,
}

/// Regions and unit sections of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Every addressable region other than the result region
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub unit_sections: Vec<UnitSection>,
}

impl PageLayout {
    /// Layout matching [`FormState::standard`] for the same units
    pub fn standard(units: &[UnitTag]) -> Self {
        PageLayout::for_form(&FormState::standard(units))
    }

    /// Layout with one section per offered unit and one region per toggle target.
    ///
    /// ```rust
    /// use loadcalc_core::form::FormState;
    /// use loadcalc_core::layout::PageLayout;
    /// use loadcalc_core::units::UnitTag;
    ///
    /// let form = FormState::standard(&[UnitTag::new("SFD")]);
    /// let layout = PageLayout::for_form(&form);
    /// assert!(layout.has_region("unitSection_SFD"));
    /// assert!(layout.has_region("rangeLoadGroup_SFD"));
    /// ```
    pub fn for_form(form: &FormState) -> Self {
        let mut layout = PageLayout::default();
        for unit in form.offered_units() {
            let region = unit.section_id();
            layout.add_region(&region);
            layout.unit_sections.push(UnitSection { region, unit });
        }
        for toggle in &form.toggles {
            layout.add_region(&toggle.target);
        }
        layout
    }

    fn add_region(&mut self, id: &str) {
        if !self.has_region(id) {
            self.regions.push(id.to_string());
        }
    }

    pub fn has_region(&self, id: &str) -> bool {
        self.regions.iter().any(|r| r == id)
    }
}
