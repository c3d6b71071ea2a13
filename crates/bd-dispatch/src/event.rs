//! Delivery events and the append-only solution log.

use chrono::NaiveDate;

use bd_core::{FarmId, PlantId};

/// One truckload moved from a plant to a farm on a given day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeliveryEvent {
    pub date:  NaiveDate,
    pub plant: PlantId,
    pub farm:  FarmId,
    /// Never more than the truck capacity.
    pub tons:  f64,
}

/// The ordered delivery log of a run.
///
/// Events are appended in dispatch order and never edited.  Two runs over the
/// same inputs produce equal `Solution`s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    events: Vec<DeliveryEvent>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing log (e.g. one read back from disk).
    pub fn from_events(events: Vec<DeliveryEvent>) -> Self {
        Self { events }
    }

    pub fn push(&mut self, event: DeliveryEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[DeliveryEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeliveryEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn total_tons(&self) -> f64 {
        self.events.iter().map(|e| e.tons).sum()
    }

    pub fn into_events(self) -> Vec<DeliveryEvent> {
        self.events
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a DeliveryEvent;
    type IntoIter = std::slice::Iter<'a, DeliveryEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
