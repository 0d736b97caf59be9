//! # Page
//!
//! The live form: layout, control state, region visibility and the result
//! region, with the visibility controller and row manager subscribed to its
//! event bus. Every user interaction goes through a `Page` method, which
//! updates the control and then publishes the matching event.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::page::Page;
//! use loadcalc_core::units::UnitTag;
//!
//! let mut page = Page::standard(&[UnitTag::new("SFD"), UnitTag::new("SS")]);
//! assert_eq!(page.regions().is_visible("unitSection_SS"), Some(false));
//!
//! page.set_unit_selected("unitToggle_SS", true);
//! assert_eq!(page.regions().is_visible("unitSection_SS"), Some(true));
//!
//! let row = page.add_row(&UnitTag::new("SS")).unwrap();
//! page.edit_row(&UnitTag::new("SS"), &row, "Sauna", "6000");
//! assert_eq!(page.prepare_submission().units()[0].additional_load, 6000.0);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::CalculationService;
use crate::events::{EventBus, FormEvent};
use crate::form::FormState;
use crate::layout::PageLayout;
use crate::render::{ResultContent, ResultRegion};
use crate::request::CalculationRequest;
use crate::rows::{RowId, RowManager};
use crate::submit::submit;
use crate::units::UnitTag;
use crate::visibility::{Regions, VisibilityController};

/// Everything event handlers may read or change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub layout: PageLayout,
    pub form: FormState,
    pub regions: Regions,
    pub result: ResultRegion,
}

#[derive(Debug)]
pub struct Page {
    state: PageState,
    bus: EventBus,
}

impl Page {
    /// Wire the controllers and evaluate visibility once.
    pub fn load(layout: PageLayout, form: FormState) -> Self {
        let mut bus = EventBus::new();
        let visibility = VisibilityController::new(&layout);
        visibility.subscribe(&mut bus);
        RowManager::subscribe(&mut bus);

        let mut regions = Regions::from_layout(&layout);
        visibility.initialize(&form, &mut regions);

        log::debug!("Page loaded with {} region(s)", layout.regions.len());

        Page {
            state: PageState {
                layout,
                form,
                regions,
                result: ResultRegion::default(),
            },
            bus,
        }
    }

    /// Blank standard form for `units`
    pub fn standard(units: &[UnitTag]) -> Self {
        let form = FormState::standard(units);
        Page::load(PageLayout::for_form(&form), form)
    }

    /// Page for a saved form snapshot, with a layout derived from it
    pub fn from_form(form: FormState) -> Self {
        Page::load(PageLayout::for_form(&form), form)
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn form(&self) -> &FormState {
        &self.state.form
    }

    pub fn regions(&self) -> &Regions {
        &self.state.regions
    }

    pub fn result(&self) -> &ResultRegion {
        &self.state.result
    }

    fn publish(&mut self, event: FormEvent) {
        self.bus.publish(&event, &mut self.state);
    }

    /// Check or uncheck a load toggle. Returns false if no such toggle.
    pub fn set_toggle(&mut self, toggle_id: &str, checked: bool) -> bool {
        if !self.state.form.set_toggle(toggle_id, checked) {
            return false;
        }
        self.publish(FormEvent::ToggleChanged {
            toggle_id: toggle_id.to_string(),
            checked,
        });
        true
    }

    /// Check or uncheck a unit selector. Returns false if no such selector.
    pub fn set_unit_selected(&mut self, selector_id: &str, checked: bool) -> bool {
        if !self.state.form.set_unit_selected(selector_id, checked) {
            return false;
        }
        self.publish(FormEvent::UnitSelectionChanged {
            selector_id: selector_id.to_string(),
            checked,
        });
        true
    }

    /// Press "add row" in `unit`'s additional-loads area.
    ///
    /// Returns the new row's id, or None if the unit has no such area.
    pub fn add_row(&mut self, unit: &UnitTag) -> Option<RowId> {
        let row = Uuid::new_v4();
        self.publish(FormEvent::AddRowRequested {
            unit: unit.clone(),
            row,
        });
        self.state
            .form
            .additional_loads(unit)
            .and_then(|table| table.get(&row))
            .map(|_| row)
    }

    /// Press "remove" on one row. Returns false if the row did not exist.
    pub fn remove_row(&mut self, unit: &UnitTag, row: &RowId) -> bool {
        let exists = self
            .state
            .form
            .additional_loads(unit)
            .is_some_and(|table| table.get(row).is_some());
        if exists {
            self.publish(FormEvent::RemoveRowRequested {
                unit: unit.clone(),
                row: *row,
            });
        }
        exists
    }

    /// Type into a row's description and wattage inputs
    pub fn edit_row(&mut self, unit: &UnitTag, row: &RowId, description: &str, watts: &str) -> bool {
        match self
            .state
            .form
            .additional_loads_mut(unit)
            .and_then(|table| table.get_mut(row))
        {
            Some(item) => {
                item.description = description.to_string();
                item.watts = watts.to_string();
                true
            }
            None => false,
        }
    }

    /// Type into a named input
    pub fn set_value(&mut self, name: &str, value: &str) {
        self.state.form.set_value(name, value);
    }

    pub fn set_interlock(&mut self, unit: &UnitTag, checked: bool) -> bool {
        self.state.form.set_interlock(unit, checked)
    }

    pub fn set_conductor_type(&mut self, conductor_type: &str) {
        self.state.form.conductor_type = conductor_type.to_string();
    }

    /// Build the request for the current selection
    pub fn prepare_submission(&self) -> CalculationRequest {
        CalculationRequest::from_form(&self.state.form)
    }

    /// Show a finished submission's outcome
    pub fn apply_outcome(&mut self, content: ResultContent) {
        self.state.result.show(content);
    }

    /// Prepare, send and display in one go.
    ///
    /// Holds the page mutably until the response arrives, so only one
    /// submission can be in flight through it. Callers that need overlapping
    /// submissions use [`Page::prepare_submission`], [`crate::submit::submit`]
    /// and [`Page::apply_outcome`] directly.
    pub async fn submit<S: CalculationService>(&mut self, service: &S) -> &ResultRegion {
        let request = self.prepare_submission();
        let content = submit(service, &request).await;
        self.apply_outcome(content);
        &self.state.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoadCalcResult;
    use crate::form::Toggle;
    use crate::result::CalculationResult;
    use crate::units::OptionalLoad;

    fn sfd() -> UnitTag {
        UnitTag::new("SFD")
    }

    #[test]
    fn test_toggle_event_updates_region() {
        let mut page = Page::standard(&[sfd()]);
        let toggle = Toggle::standard_id(OptionalLoad::EvCharging, &sfd());

        assert!(page.set_toggle(&toggle, true));
        assert_eq!(page.regions().is_visible("evLoadGroup_SFD"), Some(true));
        assert!(page.set_toggle(&toggle, false));
        assert_eq!(page.regions().is_visible("evLoadGroup_SFD"), Some(false));
        assert!(!page.set_toggle("no-such-toggle", true));
    }

    #[test]
    fn test_load_honours_prechecked_controls() {
        let mut form = FormState::standard(&[sfd()]);
        form.set_toggle(&Toggle::standard_id(OptionalLoad::Steamer, &sfd()), true);
        form.set_unit_selected("unitToggle_SFD", true);

        let page = Page::from_form(form);
        assert_eq!(page.regions().is_visible("steamerLoadGroup_SFD"), Some(true));
        assert_eq!(page.regions().is_visible("unitSection_SFD"), Some(true));
        assert!(!page.result().visible);
    }

    #[test]
    fn test_toggle_with_missing_target_region_is_noop() {
        let mut form = FormState::standard(&[sfd()]);
        form.toggles.push(Toggle {
            id: "orphan".to_string(),
            target: "notOnPage".to_string(),
            checked: false,
        });
        let mut page = Page::load(PageLayout::standard(&[sfd()]), form);

        assert!(page.set_toggle("orphan", true));
        assert_eq!(page.regions().is_visible("notOnPage"), None);
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut page = Page::standard(&[sfd()]);
        let first = page.add_row(&sfd()).unwrap();
        let second = page.add_row(&sfd()).unwrap();
        page.edit_row(&sfd(), &first, "Kiln", "4000");
        page.edit_row(&sfd(), &second, "Hot plate", "1200");

        assert!(page.remove_row(&sfd(), &first));
        assert!(!page.remove_row(&sfd(), &first));

        let table = page.form().additional_loads(&sfd()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].description, "Hot plate");
        assert!(page.add_row(&UnitTag::new("LWH")).is_none());
    }

    struct Canned(LoadCalcResult<CalculationResult>);

    impl CalculationService for Canned {
        async fn calculate(&self, _request: &CalculationRequest) -> LoadCalcResult<CalculationResult> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_submit_error_makes_region_visible() {
        let mut page = Page::standard(&[sfd()]);
        let service = Canned(Err(crate::errors::LoadCalcError::service_rejected(500, "boom")));

        let region = page.submit(&service).await;
        assert!(region.visible);
        assert_eq!(region.content, Some(ResultContent::error("boom")));
    }
}
