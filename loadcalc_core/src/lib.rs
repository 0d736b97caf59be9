//! # loadcalc_core - Residential Service Load Form Core
//!
//! `loadcalc_core` is the logic behind an electrical-load-calculation form.
//! It keeps the form's visibility state, collects the entered values into a
//! well-formed request, sends the request to a remote calculation service and
//! renders the answer. It does no load arithmetic itself.
//!
//! ## Design Philosophy
//!
//! - **Explicit State**: the form is a serializable [`FormState`], not values
//!   scattered over a page
//! - **Never Fail on Input**: malformed numbers become 0, missing controls
//!   read as off
//! - **One Error Path**: every submission failure ends up as a rendered
//!   message
//!
//! ## Quick Start
//!
//! ```rust
//! use loadcalc_core::page::Page;
//! use loadcalc_core::units::UnitTag;
//!
//! let sfd = UnitTag::new("SFD");
//! let mut page = Page::standard(&[sfd.clone()]);
//! page.set_unit_selected("unitToggle_SFD", true);
//! page.set_value("livingArea_SFD", "150");
//!
//! let request = page.prepare_submission();
//! let json = request.to_json().unwrap();
//! assert!(json.contains("\"num_units\": 1"));
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit tags, optional loads and the input naming scheme
//! - [`form`] - Explicit form state
//! - [`layout`] - Declarative page regions and unit sections
//! - [`events`] - Publish/subscribe dispatch of user interaction
//! - [`visibility`] - Toggle and unit-section visibility rules
//! - [`rows`] - Additional-load line items
//! - [`extract`] - Per-unit input normalization
//! - [`request`] - Calculation request payload
//! - [`client`] - Calculation service client
//! - [`result`] - Calculation service response
//! - [`render`] - Result and error views
//! - [`submit`] - Submission boundary
//! - [`page`] - The live page tying it together
//! - [`config`] - Client configuration
//! - [`errors`] - Structured error types

pub mod client;
pub mod config;
pub mod errors;
pub mod events;
pub mod extract;
pub mod form;
pub mod layout;
pub mod page;
pub mod render;
pub mod request;
pub mod result;
pub mod rows;
pub mod submit;
pub mod units;
pub mod visibility;

// Re-export commonly used types at crate root for convenience
pub use client::{CalculationService, HttpCalculationClient};
pub use config::ClientConfig;
pub use errors::{LoadCalcError, LoadCalcResult};
pub use extract::UnitRecord;
pub use form::FormState;
pub use page::Page;
pub use render::{ResultContent, ResultView};
pub use request::CalculationRequest;
pub use result::CalculationResult;
pub use units::UnitTag;
