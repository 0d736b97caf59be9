//! # Additional Loads
//!
//! Each unit has an additional-loads area: a table of user-added line items
//! (description plus wattage) for appliances not covered by a dedicated
//! section. Rows live only as long as the form session.
//!
//! Only rows above [`ADDITIONAL_LOAD_THRESHOLD_W`] count toward the unit's
//! `additional_load`. Smaller rows are kept in the table but ignored when
//! summing.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::rows::{AdditionalLoadTable, LineItem};
//!
//! let mut table = AdditionalLoadTable::default();
//! table.push(LineItem::new("Sauna", "6000"));
//! table.push(LineItem::new("Kettle", "1500"));
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.qualifying_total(), 6000.0);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::{EventBus, EventSource, FormEvent};
use crate::extract::parse_number;
use crate::form::FormState;
use crate::units::UnitTag;

/// Rows at or below this wattage do not contribute to the additional load
pub const ADDITIONAL_LOAD_THRESHOLD_W: f64 = 1500.0;

/// Identity of one line item
pub type RowId = Uuid;

/// One user-added additional load.
///
/// The page's wattage input only offers values from 1501 up, but a snapshot
/// may still hold anything; rows that do not qualify are simply left out of
/// the sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Fresh when a snapshot leaves it out
    #[serde(default = "Uuid::new_v4")]
    pub id: RowId,
    #[serde(default)]
    pub description: String,
    /// Raw wattage text as typed
    #[serde(default)]
    pub watts: String,
}

impl LineItem {
    /// New row with a fresh id
    pub fn new(description: impl Into<String>, watts: impl Into<String>) -> Self {
        LineItem::with_id(Uuid::new_v4(), description, watts)
    }

    pub fn with_id(id: RowId, description: impl Into<String>, watts: impl Into<String>) -> Self {
        LineItem {
            id,
            description: description.into(),
            watts: watts.into(),
        }
    }

    /// Parsed wattage, 0 when blank or malformed
    pub fn watts_value(&self) -> f64 {
        parse_number(Some(self.watts.as_str()))
    }

    /// Whether this row counts toward the additional load
    pub fn qualifies(&self) -> bool {
        self.watts_value() > ADDITIONAL_LOAD_THRESHOLD_W
    }
}

/// Line items of one unit, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalLoadTable {
    rows: Vec<LineItem>,
}

impl AdditionalLoadTable {
    pub fn push(&mut self, row: LineItem) {
        self.rows.push(row);
    }

    /// Remove exactly the row with `id`
    pub fn remove(&mut self, id: &RowId) -> Option<LineItem> {
        let index = self.rows.iter().position(|r| &r.id == id)?;
        Some(self.rows.remove(index))
    }

    pub fn get(&self, id: &RowId) -> Option<&LineItem> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn get_mut(&mut self, id: &RowId) -> Option<&mut LineItem> {
        self.rows.iter_mut().find(|r| &r.id == id)
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the wattages strictly above the threshold
    pub fn qualifying_total(&self) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.qualifies())
            .map(LineItem::watts_value)
            .sum()
    }
}

/// Reacts to add/remove requests on the additional-loads areas.
pub struct RowManager;

impl RowManager {
    /// Register the add and remove handlers on `bus`.
    pub fn subscribe(bus: &mut EventBus) {
        bus.subscribe(EventSource::AddRow, |event, state| {
            if let FormEvent::AddRowRequested { unit, row } = event {
                add_row(&mut state.form, unit, *row);
            }
        });
        bus.subscribe(EventSource::RemoveRow, |event, state| {
            if let FormEvent::RemoveRowRequested { unit, row } = event {
                remove_row(&mut state.form, unit, row);
            }
        });
    }
}

/// Append an empty row to `unit`'s table. No-op if the unit has no table.
pub fn add_row(form: &mut FormState, unit: &UnitTag, id: RowId) -> bool {
    match form.additional_loads_mut(unit) {
        Some(table) => {
            table.push(LineItem::with_id(id, "", ""));
            log::debug!("Added additional load row {} to unit {}", id, unit);
            true
        }
        None => {
            log::debug!("Unit {} has no additional loads area; add ignored", unit);
            false
        }
    }
}

/// Remove one row from `unit`'s table.
pub fn remove_row(form: &mut FormState, unit: &UnitTag, id: &RowId) -> bool {
    let removed = form
        .additional_loads_mut(unit)
        .and_then(|table| table.remove(id))
        .is_some();
    if removed {
        log::debug!("Removed additional load row {} from unit {}", id, unit);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let mut table = AdditionalLoadTable::default();
        table.push(LineItem::new("Exactly threshold", "1500"));
        assert_eq!(table.qualifying_total(), 0.0);

        table.push(LineItem::new("Just over", "1500.5"));
        assert_eq!(table.qualifying_total(), 1500.5);
    }

    #[test]
    fn test_small_and_malformed_rows_are_kept_but_ignored() {
        let mut table = AdditionalLoadTable::default();
        table.push(LineItem::new("Toaster", "900"));
        table.push(LineItem::new("Unknown", "lots"));
        table.push(LineItem::new("Blank", ""));
        table.push(LineItem::new("Heater", "2000"));
        table.push(LineItem::new("Welder", "7500"));

        assert_eq!(table.len(), 5);
        assert_eq!(table.qualifying_total(), 9500.0);
    }

    #[test]
    fn test_remove_deletes_only_that_row() {
        let mut table = AdditionalLoadTable::default();
        let first = LineItem::new("A", "2000");
        let second = LineItem::new("B", "3000");
        let third = LineItem::new("C", "4000");
        let target = second.id;
        table.push(first.clone());
        table.push(second);
        table.push(third.clone());

        assert!(table.remove(&target).is_some());
        assert!(table.remove(&target).is_none());
        assert_eq!(table.rows(), &[first, third]);
    }

    #[test]
    fn test_add_row_without_area_is_noop() {
        let mut form = FormState::default();
        assert!(!add_row(&mut form, &UnitTag::new("SFD"), Uuid::new_v4()));

        let mut form = FormState::standard(&[UnitTag::new("SFD")]);
        let id = Uuid::new_v4();
        assert!(add_row(&mut form, &UnitTag::new("SFD"), id));
        assert!(remove_row(&mut form, &UnitTag::new("SFD"), &id));
        assert!(!remove_row(&mut form, &UnitTag::new("SFD"), &id));
    }
}
