//! Reference data types for the booking workflow
//!
//! - `SpecialtyCode`: key into the doctor table
//! - `Doctor`: a bookable practitioner
//! - `TimeSlot`: a bookable time label

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time labels offered for every bookable day, in display order
pub const DEFAULT_TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "01:00 PM",
    "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
];

/// Specialty key such as `cardiology`
///
/// Any string is representable so that unknown keys coming from the page
/// can still be looked up (and resolve to no doctors).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialtyCode(String);

impl SpecialtyCode {
    pub const CARDIOLOGY: &'static str = "cardiology";
    pub const GENERAL: &'static str = "general";
    pub const ENT: &'static str = "ent";
    pub const NEUROLOGY: &'static str = "neurology";
    pub const ORTHOPEDICS: &'static str = "orthopedics";
    pub const OPHTHALMOLOGY: &'static str = "ophthalmology";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SpecialtyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for SpecialtyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A doctor that can be booked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Stable option value, e.g. `c1`
    pub id: String,
    /// Display text, e.g. `Dr. John Smith`
    pub name: String,
    pub specialty: SpecialtyCode,
}

impl Doctor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        specialty: impl Into<SpecialtyCode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialty: specialty.into(),
        }
    }
}

/// A bookable time label such as `09:00 AM`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimeSlot {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed slot sequence as owned values
pub fn default_time_slots() -> Vec<TimeSlot> {
    DEFAULT_TIME_SLOTS.iter().copied().map(TimeSlot::from).collect()
}
