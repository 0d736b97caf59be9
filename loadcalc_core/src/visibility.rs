//! # Visibility
//!
//! Two rules decide which regions of the page are shown:
//!
//! - **Toggle rule**: a toggle shows its target region while checked and
//!   hides it while unchecked.
//! - **Unit rule**: a unit section is shown iff at least one checked unit
//!   selector carries the section's tag.
//!
//! Both are evaluated once when the page loads and again whenever the
//! relevant controls change. Regions that do not exist are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::events::{EventBus, EventSource, FormEvent};
use crate::form::FormState;
use crate::layout::{PageLayout, UnitSection};
use crate::page::PageState;

/// Shown/hidden state of every declared region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Regions {
    visible: BTreeMap<String, bool>,
}

impl Regions {
    /// All regions of `layout`, hidden until evaluated
    pub fn from_layout(layout: &PageLayout) -> Self {
        Regions {
            visible: layout.regions.iter().map(|id| (id.clone(), false)).collect(),
        }
    }

    /// Show or hide a region. Returns false (and does nothing) if it does not exist.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.visible.get_mut(id) {
            Some(state) => {
                *state = visible;
                true
            }
            None => false,
        }
    }

    /// None if the region does not exist
    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.visible.get(id).copied()
    }
}

/// Applies the toggle and unit rules.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    unit_sections: Vec<UnitSection>,
}

impl VisibilityController {
    pub fn new(layout: &PageLayout) -> Self {
        VisibilityController {
            unit_sections: layout.unit_sections.clone(),
        }
    }

    /// Evaluate every rule against the current form, as done once on load.
    pub fn initialize(&self, form: &FormState, regions: &mut Regions) {
        for toggle in &form.toggles {
            regions.set_visible(&toggle.target, toggle.checked);
        }
        self.refresh_unit_sections(form, regions);
    }

    /// Re-evaluate the unit rule for every section
    pub fn refresh_unit_sections(&self, form: &FormState, regions: &mut Regions) {
        for section in &self.unit_sections {
            regions.set_visible(&section.region, form.is_unit_selected(&section.unit));
        }
    }

    /// Apply the toggle rule for one toggle
    pub fn apply_toggle(form: &FormState, toggle_id: &str, checked: bool, regions: &mut Regions) {
        let Some(toggle) = form.toggle(toggle_id) else {
            return;
        };
        if !regions.set_visible(&toggle.target, checked) {
            log::debug!("Toggle {} targets missing region {}", toggle_id, toggle.target);
        }
    }

    /// Register the toggle and unit-selection handlers on `bus`.
    pub fn subscribe(&self, bus: &mut EventBus) {
        bus.subscribe(EventSource::Toggle, |event, state: &mut PageState| {
            if let FormEvent::ToggleChanged { toggle_id, checked } = event {
                VisibilityController::apply_toggle(&state.form, toggle_id, *checked, &mut state.regions);
            }
        });

        let controller = self.clone();
        bus.subscribe(EventSource::UnitSelection, move |_, state: &mut PageState| {
            controller.refresh_unit_sections(&state.form, &mut state.regions);
        });
    }
}
