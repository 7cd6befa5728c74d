//! Doctor availability editor
//!
//! One entry per weekday: an availability switch that shows or hides the
//! day's time-slot buttons, and slot buttons that toggle on click.

use serde::{Deserialize, Serialize};

use crate::events::{Component, Effect, Topic, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotToggle {
    pub time: String,
    #[serde(default)]
    pub active: bool,
}

/// A `.availability-day` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub day: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub slots: Vec<SlotToggle>,
}

impl AvailabilityDay {
    pub fn new<'a>(day: &str, available: bool, slots: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            day: day.to_string(),
            available,
            slots: slots
                .into_iter()
                .map(|time| SlotToggle {
                    time: time.to_string(),
                    active: false,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityDayView {
    pub day: String,
    pub available: bool,
    /// `display` of the `.time-slots` container
    pub slots_display: &'static str,
    pub slots: Vec<SlotToggle>,
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityEditor {
    days: Vec<AvailabilityDay>,
}

impl AvailabilityEditor {
    pub fn new(days: Vec<AvailabilityDay>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[AvailabilityDay] {
        &self.days
    }

    fn day_mut(&mut self, day: &str) -> Option<&mut AvailabilityDay> {
        self.days.iter_mut().find(|d| d.day == day)
    }

    /// Returns false for an unknown day
    pub fn set_available(&mut self, day: &str, available: bool) -> bool {
        let Some(entry) = self.day_mut(day) else {
            return false;
        };
        entry.available = available;
        tracing::info!(day, available, "Availability changed");
        true
    }

    /// Flip a slot button; returns its new state
    pub fn toggle_slot(&mut self, day: &str, time: &str) -> Option<bool> {
        let slot = self
            .day_mut(day)?
            .slots
            .iter_mut()
            .find(|slot| slot.time == time.trim())?;
        slot.active = !slot.active;
        tracing::info!(day, time = %slot.time, active = slot.active, "Time slot toggled");
        Some(slot.active)
    }

    pub fn view(&self) -> Vec<AvailabilityDayView> {
        self.days
            .iter()
            .map(|d| AvailabilityDayView {
                day: d.day.clone(),
                available: d.available,
                slots_display: if d.available { "flex" } else { "none" },
                slots: d.slots.clone(),
            })
            .collect()
    }
}

impl Component for AvailabilityEditor {
    fn name(&self) -> &'static str {
        "availability"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Dashboard]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::AvailabilityToggled { day, available } => {
                if !self.set_available(day, *available) {
                    tracing::warn!(day = %day, "Unknown availability day");
                }
            }
            UiEvent::TimeSlotClicked { day, time } => {
                if self.toggle_slot(day, time).is_none() {
                    tracing::warn!(day = %day, time = %time, "Unknown time slot");
                }
            }
            _ => {}
        }
        Vec::new()
    }
}
