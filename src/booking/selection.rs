//! Selection state and select-field models
//!
//! `SelectionState` is what the user has chosen; `SelectField` is what a
//! dependent `<select>` currently offers.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::BookingField;
use crate::directory::{Doctor, SpecialtyCode, TimeSlot};

pub const DOCTOR_PLACEHOLDER: &str = "Select doctor";
pub const TIME_PLACEHOLDER: &str = "Select time";

/// Values chosen so far, upstream first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub specialty: Option<SpecialtyCode>,
    pub doctor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.specialty.is_none()
            && self.doctor_id.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }

    /// First field still empty, upstream first
    pub fn first_missing(&self) -> Option<BookingField> {
        if self.specialty.is_none() {
            Some(BookingField::Specialty)
        } else if self.doctor_id.is_none() {
            Some(BookingField::Doctor)
        } else if self.date.is_none() {
            Some(BookingField::Date)
        } else if self.time.is_none() {
            Some(BookingField::Time)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }
}

/// One `<option>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&Doctor> for SelectOption {
    fn from(doctor: &Doctor) -> Self {
        Self::new(&doctor.id, &doctor.name)
    }
}

impl From<&TimeSlot> for SelectOption {
    fn from(slot: &TimeSlot) -> Self {
        Self::new(slot.as_str(), slot.as_str())
    }
}

/// A dependent select: placeholder, options, selection and enabled flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub enabled: bool,
}

impl SelectField {
    /// Empty, disabled field showing only its placeholder
    pub fn disabled(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            options: Vec::new(),
            selected: None,
            enabled: false,
        }
    }

    /// Drop all options and the selection
    pub fn reset(&mut self, enabled: bool) {
        self.options.clear();
        self.selected = None;
        self.enabled = enabled;
    }

    /// Replace options, keeping the placeholder selected
    pub fn populate(&mut self, options: impl IntoIterator<Item = SelectOption>) {
        self.options = options.into_iter().collect();
        self.selected = None;
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    /// Select an option by value; false if absent
    pub fn select(&mut self, value: &str) -> bool {
        if self.contains(value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }

    /// Back to the placeholder, options kept
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Display text of the selected option
    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected.as_deref()?;
        self.options
            .iter()
            .find(|option| option.value == selected)
            .map(|option| option.label.as_str())
    }

    /// Labels of the non-placeholder options
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_missing_upstream_first() {
        let mut state = SelectionState::default();
        assert!(state.is_empty());
        assert_eq!(state.first_missing(), Some(BookingField::Specialty));

        state.specialty = Some("ent".into());
        state.date = NaiveDate::from_ymd_opt(2025, 3, 10);
        assert_eq!(state.first_missing(), Some(BookingField::Doctor));

        state.doctor_id = Some("e1".to_string());
        state.time = Some("09:00 AM".into());
        assert!(state.is_complete());
    }

    #[test]
    fn test_select_field() {
        let mut field = SelectField::disabled(DOCTOR_PLACEHOLDER);
        assert!(!field.enabled);
        assert!(field.options.is_empty());

        field.reset(true);
        field.populate(vec![
            SelectOption::new("c1", "Dr. John Smith"),
            SelectOption::new("c2", "Dr. Emily Johnson"),
        ]);
        assert!(field.select("c2"));
        assert_eq!(field.selected_label(), Some("Dr. Emily Johnson"));
        assert!(!field.select("zz"));
        assert_eq!(field.selected.as_deref(), Some("c2"));

        field.clear_selection();
        assert_eq!(field.selected_label(), None);
        assert_eq!(field.labels(), vec!["Dr. John Smith", "Dr. Emily Johnson"]);

        field.reset(false);
        assert!(field.options.is_empty());
        assert!(!field.enabled);
    }
}
