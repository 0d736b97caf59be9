//! # Result Rendering
//!
//! Turns a [`CalculationResult`] (or a submission failure) into what the
//! result region displays. The single/multi decision is taken once, in
//! [`ResultView::from_result`], and carried as an explicit variant from
//! there on.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::render::ResultView;
//! use loadcalc_core::result::CalculationResult;
//!
//! let result: CalculationResult = serde_json::from_str(
//!     r##"{"Total Calculated Load (Watts)": 15000, "Total Amps": 62.5,
//!         "Service OCP size (Amps)": "100A",
//!         "Service Conductor Type and Size": "#3, Copper (Rated 100A)"}"##,
//! ).unwrap();
//!
//! let view = ResultView::from_result(&result);
//! assert!(view.unit_blocks().is_empty());
//! assert!(view.render_text().contains("Total Amps: 62.50"));
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::{display_field, CalculationResult, ResultShape, NOT_AVAILABLE};

const HEADING: &str = "Calculation Results";
const UNITS_HEADING: &str = "Units Detail";

/// Figures shown for every result shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_load: String,
    pub total_amps: String,
}

/// Detail block for one unit of a multi-unit result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitBlock {
    pub index: String,
    pub area: String,
    pub load: String,
    pub amps: String,
    pub panel_ocp: String,
    pub panel_conductor: String,
}

/// Display structure for a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ResultView {
    SingleUnit {
        summary: Summary,
        service_ocp: String,
        service_conductor: String,
    },
    MultiUnit {
        summary: Summary,
        service_conductor: String,
        units: Vec<UnitBlock>,
    },
}

fn amps(value: f64) -> String {
    format!("{:.2}", value)
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

impl ResultView {
    pub fn from_result(result: &CalculationResult) -> Self {
        let summary = Summary {
            total_load: result.total_load_watts.to_string(),
            total_amps: amps(result.total_amps),
        };
        let service_conductor = display_field(&result.service_conductor);

        match (result.shape(), &result.units) {
            (ResultShape::MultiUnit, Some(units)) => ResultView::MultiUnit {
                summary,
                service_conductor,
                units: units
                    .iter()
                    .enumerate()
                    .map(|(position, unit)| UnitBlock {
                        index: unit.unit_index.unwrap_or(position as u32 + 1).to_string(),
                        area: optional_number(unit.area_m2),
                        load: optional_number(unit.total_unit_load_watts),
                        amps: amps(unit.unit_amps),
                        panel_ocp: display_field(&unit.unit_panel_ocp_size),
                        panel_conductor: display_field(&unit.unit_panel_conductor),
                    })
                    .collect(),
            },
            _ => ResultView::SingleUnit {
                summary,
                service_ocp: display_field(&result.service_ocp_size),
                service_conductor,
            },
        }
    }

    pub fn shape(&self) -> ResultShape {
        match self {
            ResultView::SingleUnit { .. } => ResultShape::SingleUnit,
            ResultView::MultiUnit { .. } => ResultShape::MultiUnit,
        }
    }

    pub fn summary(&self) -> &Summary {
        match self {
            ResultView::SingleUnit { summary, .. } | ResultView::MultiUnit { summary, .. } => summary,
        }
    }

    /// Unit detail blocks; empty for a single-unit view
    pub fn unit_blocks(&self) -> &[UnitBlock] {
        match self {
            ResultView::SingleUnit { .. } => &[],
            ResultView::MultiUnit { units, .. } => units,
        }
    }

    /// Labeled top-level lines in display order
    fn lines(&self) -> Vec<(&'static str, &str)> {
        let summary = self.summary();
        let mut lines = vec![
            ("Total Calculated Load (Watts)", summary.total_load.as_str()),
            ("Total Amps", summary.total_amps.as_str()),
        ];
        match self {
            ResultView::SingleUnit {
                service_ocp,
                service_conductor,
                ..
            } => {
                lines.push(("Service OCP Size (Amps)", service_ocp.as_str()));
                lines.push(("Service Conductor Type and Size", service_conductor.as_str()));
            }
            ResultView::MultiUnit { service_conductor, .. } => {
                lines.push(("Service Conductor Type and Size", service_conductor.as_str()));
            }
        }
        lines
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", HEADING);
        for (label, value) in self.lines() {
            let _ = writeln!(out, "{}: {}", label, value);
        }
        let blocks = self.unit_blocks();
        if !blocks.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", UNITS_HEADING);
            for block in blocks {
                let _ = writeln!(out, "Unit {}:", block.index);
                let _ = writeln!(out, "  Area (m²): {}", block.area);
                let _ = writeln!(out, "  Total Unit Load (Watts): {}", block.load);
                let _ = writeln!(out, "  Unit Amps: {} A", block.amps);
                let _ = writeln!(out, "  Unit Panel OCP Size: {}", block.panel_ocp);
                let _ = writeln!(out, "  Unit Panel Conductor: {}", block.panel_conductor);
            }
        }
        out
    }

    /// HTML fragment for the page's result region
    pub fn render_html(&self) -> String {
        let mut html = format!("<h2>{}</h2>", HEADING);
        for (label, value) in self.lines() {
            let _ = write!(html, "<p><strong>{}:</strong> {}</p>", label, escape_html(value));
        }
        let blocks = self.unit_blocks();
        if !blocks.is_empty() {
            let _ = write!(html, "<h3>{}</h3>", UNITS_HEADING);
            for block in blocks {
                html.push_str("<div class=\"unit-result\">");
                let _ = write!(html, "<p><strong>Unit {}:</strong></p>", escape_html(&block.index));
                let _ = write!(html, "<p>Area (m²): {}</p>", escape_html(&block.area));
                let _ = write!(html, "<p>Total Unit Load (Watts): {}</p>", escape_html(&block.load));
                let _ = write!(html, "<p>Unit Amps: {} A</p>", escape_html(&block.amps));
                let _ = write!(html, "<p>Unit Panel OCP Size: {}</p>", escape_html(&block.panel_ocp));
                let _ = write!(html, "<p>Unit Panel Conductor: {}</p>", escape_html(&block.panel_conductor));
                html.push_str("</div>");
            }
        }
        html
    }
}

/// What the result region holds after a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ResultContent {
    Result { view: ResultView },
    Error { message: String },
}

impl ResultContent {
    pub fn error(message: impl Into<String>) -> Self {
        ResultContent::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultContent::Error { .. })
    }

    pub fn render_text(&self) -> String {
        match self {
            ResultContent::Result { view } => view.render_text(),
            ResultContent::Error { message } => format!("Error: {}\n", message),
        }
    }

    pub fn render_html(&self) -> String {
        match self {
            ResultContent::Result { view } => view.render_html(),
            ResultContent::Error { message } => {
                format!("<p class=\"error\" style=\"color:red;\">{}</p>", escape_html(message))
            }
        }
    }
}

/// The page's single result display area.
///
/// Hidden until the first submission finishes; every later outcome replaces
/// the previous one, so the last response to arrive is what stays visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRegion {
    pub visible: bool,
    pub content: Option<ResultContent>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResultRegion {
    /// Show `content`, replacing whatever was displayed
    pub fn show(&mut self, content: ResultContent) {
        self.visible = true;
        self.content = Some(content);
        self.updated_at = Some(Utc::now());
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
