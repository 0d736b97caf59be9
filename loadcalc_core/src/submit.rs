//! # Submission
//!
//! The boundary where every failure becomes a rendered message. Nothing
//! escapes [`submit`]: the caller always gets something to put in the
//! result region.
//!
//! A submission is three steps, so no borrow of the page is held while the
//! request is in flight:
//!
//! 1. `CalculationRequest::from_form` (synchronous, reads the form)
//! 2. [`submit`] (awaits the service)
//! 3. `ResultRegion::show` (synchronous, overwrites the previous outcome)

use crate::client::CalculationService;
use crate::render::{ResultContent, ResultView};
use crate::request::CalculationRequest;
use crate::result::ResultShape;

/// Send `request` and turn the outcome into result-region content.
pub async fn submit<S: CalculationService>(service: &S, request: &CalculationRequest) -> ResultContent {
    match service.calculate(request).await {
        Ok(result) => {
            let view = ResultView::from_result(&result);
            let expected = ResultShape::expected_for(request.num_units());
            if view.shape() != expected {
                // Shape comes from the response's unit list, not from what was sent
                log::warn!(
                    "Submitted {} unit(s) but the response has {} per-unit entries; rendering as {:?}",
                    request.num_units(),
                    result.unit_count(),
                    view.shape()
                );
            }
            log::info!("Calculation finished: {} W total", result.total_load_watts);
            ResultContent::Result { view }
        }
        Err(e) => {
            log::warn!("Calculation failed [{}]: {}", e.error_code(), e);
            ResultContent::error(e.to_string())
        }
    }
}
