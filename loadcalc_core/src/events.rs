//! # Form Events
//!
//! Publish/subscribe dispatch for user interaction. Controllers register a
//! handler against an [`EventSource`]; publishing an event runs every handler
//! registered for its source, synchronously and in registration order.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::events::{EventBus, EventSource, FormEvent};
//! use loadcalc_core::page::PageState;
//!
//! let mut bus = EventBus::new();
//! bus.subscribe(EventSource::Toggle, |event, state| {
//!     if let FormEvent::ToggleChanged { toggle_id, checked } = event {
//!         state.form.set_toggle(toggle_id, *checked);
//!     }
//! });
//!
//! let mut state = PageState::default();
//! let event = FormEvent::ToggleChanged { toggle_id: "t".to_string(), checked: true };
//! assert_eq!(bus.publish(&event, &mut state), 1);
//! ```

use std::fmt;

use crate::page::PageState;
use crate::rows::RowId;
use crate::units::UnitTag;

/// Named source a handler listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// A load toggle changed state
    Toggle,
    /// A unit selector changed state
    UnitSelection,
    /// "Add row" pressed in an additional-loads area
    AddRow,
    /// "Remove" pressed on a line item
    RemoveRow,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventSource::Toggle => "toggle",
            EventSource::UnitSelection => "unit-selection",
            EventSource::AddRow => "add-row",
            EventSource::RemoveRow => "remove-row",
        };
        f.write_str(name)
    }
}

/// A user interaction, published after the control's own state has changed.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ToggleChanged { toggle_id: String, checked: bool },
    UnitSelectionChanged { selector_id: String, checked: bool },
    AddRowRequested { unit: UnitTag, row: RowId },
    RemoveRowRequested { unit: UnitTag, row: RowId },
}

impl FormEvent {
    pub fn source(&self) -> EventSource {
        match self {
            FormEvent::ToggleChanged { .. } => EventSource::Toggle,
            FormEvent::UnitSelectionChanged { .. } => EventSource::UnitSelection,
            FormEvent::AddRowRequested { .. } => EventSource::AddRow,
            FormEvent::RemoveRowRequested { .. } => EventSource::RemoveRow,
        }
    }
}

/// Handler invoked with the event and the page it happened on
pub type Handler = Box<dyn FnMut(&FormEvent, &mut PageState)>;

struct Subscription {
    source: EventSource,
    handler: Handler,
}

/// Registry of handlers, dispatched in registration order.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Register `handler` for events from `source`
    pub fn subscribe<F>(&mut self, source: EventSource, handler: F)
    where
        F: FnMut(&FormEvent, &mut PageState) + 'static,
    {
        self.subscriptions.push(Subscription {
            source,
            handler: Box::new(handler),
        });
    }

    /// Run every handler registered for the event's source.
    ///
    /// Returns how many handlers ran.
    pub fn publish(&mut self, event: &FormEvent, state: &mut PageState) -> usize {
        let source = event.source();
        let mut dispatched = 0;
        for subscription in self.subscriptions.iter_mut().filter(|s| s.source == source) {
            (subscription.handler)(event, state);
            dispatched += 1;
        }
        log::debug!("Dispatched {} event to {} handler(s)", source, dispatched);
        dispatched
    }

    pub fn subscriber_count(&self, source: EventSource) -> usize {
        self.subscriptions.iter().filter(|s| s.source == source).count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_runs_in_registration_order() {
        let mut bus = EventBus::new();
        for label in ["first", "second", "third"] {
            bus.subscribe(EventSource::Toggle, move |_, state| {
                let log = state.form.inputs.entry("log".to_string()).or_default();
                log.push_str(label);
                log.push(';');
            });
        }

        let mut state = PageState::default();
        let event = FormEvent::ToggleChanged {
            toggle_id: "x".to_string(),
            checked: true,
        };
        assert_eq!(bus.publish(&event, &mut state), 3);
        assert_eq!(state.form.value("log"), Some("first;second;third;"));
    }

    #[test]
    fn test_only_matching_source_is_dispatched() {
        let mut bus = EventBus::new();
        bus.subscribe(EventSource::AddRow, |_, state| {
            state.form.set_value("hit", "yes");
        });

        let mut state = PageState::default();
        let event = FormEvent::UnitSelectionChanged {
            selector_id: "u".to_string(),
            checked: true,
        };
        assert_eq!(bus.publish(&event, &mut state), 0);
        assert_eq!(state.form.value("hit"), None);
        assert_eq!(bus.subscriber_count(EventSource::AddRow), 1);
        assert_eq!(bus.subscriber_count(EventSource::Toggle), 0);
    }
}
