//! End-to-end form flows against an in-process calculation service.

use std::cell::RefCell;

use loadcalc_core::client::CalculationService;
use loadcalc_core::errors::{LoadCalcError, LoadCalcResult};
use loadcalc_core::form::Toggle;
use loadcalc_core::page::Page;
use loadcalc_core::request::CalculationRequest;
use loadcalc_core::result::CalculationResult;
use loadcalc_core::submit::submit;
use loadcalc_core::units::{OptionalLoad, UnitTag};
use serde_json::json;

/// Records every request and answers with a fixed body
struct RecordingService {
    answer: LoadCalcResult<CalculationResult>,
    requests: RefCell<Vec<serde_json::Value>>,
}

impl RecordingService {
    fn answering(body: serde_json::Value) -> Self {
        RecordingService {
            answer: Ok(serde_json::from_value(body).unwrap()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn failing(error: LoadCalcError) -> Self {
        RecordingService {
            answer: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl CalculationService for RecordingService {
    async fn calculate(&self, request: &CalculationRequest) -> LoadCalcResult<CalculationResult> {
        self.requests.borrow_mut().push(serde_json::to_value(request).unwrap());
        self.answer.clone()
    }
}

fn two_unit_page() -> Page {
    let a = UnitTag::new("A");
    let b = UnitTag::new("B");
    let mut page = Page::standard(&[a.clone(), b.clone()]);
    page.set_unit_selected("unitToggle_A", true);
    page.set_unit_selected("unitToggle_B", true);
    page.set_conductor_type("copper");
    page.set_value("livingArea_A", "100");
    page.set_value("livingArea_B", "80");
    page.set_toggle(&Toggle::standard_id(OptionalLoad::SpaceHeating, &a), true);
    page.set_value("electricHeatingWatts_A", "3000");
    page
}

#[tokio::test]
async fn two_units_submit_and_render_multi_unit_view() {
    let mut page = two_unit_page();
    let service = RecordingService::answering(json!({
        "Total Calculated Load (Watts)": 21250,
        "Total Amps": 88.541666,
        "Service OCP size (Amps)": null,
        "Service Conductor Type and Size": "#3, Copper (Rated 100A)",
        "units": [
            {"unit_index": 1, "area_m2": 100, "total_unit_load_watts": 14000,
             "unit_amps": 58.333333, "unit_panel_ocp_size": "100A",
             "unit_panel_conductor": "#3, Copper (Rated 100A)"},
            {"unit_index": 2, "area_m2": 80, "total_unit_load_watts": 5000,
             "unit_amps": 20.833333, "unit_panel_ocp_size": "60A",
             "unit_panel_conductor": "#6, Copper (Rated 65A)"}
        ]
    }));

    let region = page.submit(&service).await;
    assert!(region.visible);
    let text = region.content.as_ref().unwrap().render_text();
    assert!(text.contains("Total Amps: 88.54"));
    assert!(text.contains("Unit Amps: 58.33 A"));
    assert!(text.contains("Unit Amps: 20.83 A"));
    assert!(text.contains("Unit Panel OCP Size: 60A"));

    let sent = service.requests.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["num_units"], json!(2));
    assert_eq!(sent[0]["conductor_type"], json!("copper"));
    assert_eq!(sent[0]["units"][0]["area_m2"], json!(100.0));
    assert_eq!(sent[0]["units"][0]["space_heating"], json!(3000.0));
    assert_eq!(sent[0]["units"][1]["area_m2"], json!(80.0));
    assert_eq!(sent[0]["units"][1]["space_heating"], json!(0.0));
}

#[tokio::test]
async fn last_finished_submission_wins() {
    let mut page = two_unit_page();
    let slow = RecordingService::answering(json!({
        "Total Calculated Load (Watts)": 1, "Total Amps": 1
    }));
    let fast = RecordingService::failing(LoadCalcError::transport("connection reset"));

    // Two submissions prepared from the same form; the second finishes first
    let first_request = page.prepare_submission();
    let second_request = page.prepare_submission();
    let second_outcome = submit(&fast, &second_request).await;
    page.apply_outcome(second_outcome);
    let first_outcome = submit(&slow, &first_request).await;
    page.apply_outcome(first_outcome);

    let content = page.result().content.as_ref().unwrap();
    assert!(!content.is_error());
}

#[test]
fn unchecking_a_unit_hides_its_section_and_drops_it_from_the_request() {
    let mut page = two_unit_page();
    assert_eq!(page.regions().is_visible("unitSection_B"), Some(true));

    page.set_unit_selected("unitToggle_B", false);
    assert_eq!(page.regions().is_visible("unitSection_B"), Some(false));

    let request = page.prepare_submission();
    assert_eq!(request.num_units(), 1);
    assert_eq!(request.units()[0].area_m2, 100.0);
}
