//! Cascading Select Controller
//!
//! Wires the specialty → doctor → date → time chain. Every transition
//! clears and disables whatever sits downstream of the field that changed,
//! so no field is ever enabled while its predecessor is empty.

use chrono::NaiveDate;
use serde::Serialize;
use std::rc::Rc;

use super::calendar::{format_long_date, parse_picker_date, DatePolicy};
use super::error::{BookingError, BookingField, BookingResult};
use super::selection::{
    SelectField, SelectOption, SelectionState, DOCTOR_PLACEHOLDER, TIME_PLACEHOLDER,
};
use crate::directory::{ScheduleProvider, SpecialtyCode, TimeSlot};

/// A confirmed booking, produced once per successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub doctor: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub message: String,
}

/// `Your appointment with {doctor} on {date} at {time} is confirmed.`
pub fn confirmation_message(doctor: &str, date: NaiveDate, time: &TimeSlot) -> String {
    format!(
        "Your appointment with {} on {} at {} is confirmed.",
        doctor,
        format_long_date(date),
        time
    )
}

/// Rendered state of the appointment form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    pub specialties: Vec<SelectOption>,
    pub specialty: Option<String>,
    pub doctor: SelectField,
    pub date_enabled: bool,
    /// Date input value, `%Y-%m-%d`
    pub date: Option<String>,
    pub time: SelectField,
}

/// The four-field appointment form
pub struct BookingForm {
    provider: Rc<dyn ScheduleProvider>,
    disable_weekends: bool,
    state: SelectionState,
    doctor: SelectField,
    time: SelectField,
}

impl BookingForm {
    pub fn new(provider: Rc<dyn ScheduleProvider>) -> Self {
        Self {
            provider,
            disable_weekends: true,
            state: SelectionState::default(),
            doctor: SelectField::disabled(DOCTOR_PLACEHOLDER),
            time: SelectField::disabled(TIME_PLACEHOLDER),
        }
    }

    /// Builder method: toggle the weekend rule
    pub fn weekends_disabled(mut self, disabled: bool) -> Self {
        self.disable_weekends = disabled;
        self
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state
    }

    pub fn doctor_field(&self) -> &SelectField {
        &self.doctor
    }

    pub fn time_field(&self) -> &SelectField {
        &self.time
    }

    /// The date input is available once a specialty is chosen
    pub fn date_enabled(&self) -> bool {
        self.state.specialty.is_some()
    }

    pub fn date_policy(&self, today: NaiveDate) -> DatePolicy {
        DatePolicy::new(today).weekends_disabled(self.disable_weekends)
    }

    /// Specialty changed: reset everything downstream, then repopulate doctors
    pub fn select_specialty(&mut self, code: &str) {
        let code = code.trim();

        self.state = SelectionState::default();
        self.doctor.reset(!code.is_empty());
        self.time.reset(false);

        if code.is_empty() {
            tracing::debug!("Specialty cleared");
            return;
        }

        let specialty = SpecialtyCode::new(code);
        let doctors = self.provider.doctors_by_specialty(&specialty);
        self.doctor.populate(doctors.iter().map(SelectOption::from));
        self.state.specialty = Some(specialty);

        tracing::debug!(
            specialty = code,
            doctors = self.doctor.options.len(),
            "Specialty selected"
        );
    }

    /// Doctor changed: clear date and time
    pub fn select_doctor(&mut self, doctor_id: &str) -> BookingResult<()> {
        if !self.doctor.enabled {
            return Err(BookingError::FieldDisabled(BookingField::Doctor));
        }

        if doctor_id.is_empty() {
            self.doctor.clear_selection();
            self.state.doctor_id = None;
        } else if self.doctor.select(doctor_id) {
            self.state.doctor_id = Some(doctor_id.to_string());
        } else {
            return Err(BookingError::UnknownOption {
                field: BookingField::Doctor,
                value: doctor_id.to_string(),
            });
        }

        self.state.date = None;
        self.state.time = None;
        self.time.reset(false);

        tracing::debug!(doctor = doctor_id, "Doctor selected");
        Ok(())
    }

    /// A day was picked: enable time and fill it with the provider's slots
    pub fn pick_date(&mut self, date: NaiveDate, today: NaiveDate) -> BookingResult<()> {
        if !self.date_enabled() {
            return Err(BookingError::FieldDisabled(BookingField::Date));
        }
        self.date_policy(today).check(date)?;

        let doctor_id = self.state.doctor_id.clone().unwrap_or_default();
        let slots = self.provider.available_slots(&doctor_id, date);

        self.state.date = Some(date);
        self.state.time = None;
        self.time.reset(true);
        self.time.populate(slots.iter().map(SelectOption::from));

        tracing::debug!(date = %date, slots = slots.len(), "Date picked");
        Ok(())
    }

    /// Same as [`pick_date`](Self::pick_date) for a picker string
    pub fn pick_date_str(&mut self, value: &str, today: NaiveDate) -> BookingResult<()> {
        let date = parse_picker_date(value)?;
        self.pick_date(date, today)
    }

    pub fn select_time(&mut self, slot: &str) -> BookingResult<()> {
        if !self.time.enabled {
            return Err(BookingError::FieldDisabled(BookingField::Time));
        }

        if slot.is_empty() {
            self.time.clear_selection();
            self.state.time = None;
            return Ok(());
        }

        if !self.time.select(slot) {
            return Err(BookingError::UnknownOption {
                field: BookingField::Time,
                value: slot.to_string(),
            });
        }
        self.state.time = Some(TimeSlot::new(slot));
        Ok(())
    }

    /// Build the confirmation for the current selection
    ///
    /// Pure: the form is left untouched and nothing leaves the process.
    pub fn submit(&self) -> BookingResult<Confirmation> {
        if let Some(field) = self.state.first_missing() {
            return Err(BookingError::Incomplete(field));
        }

        let (Some(date), Some(time)) = (self.state.date, self.state.time.clone()) else {
            return Err(BookingError::Incomplete(BookingField::Date));
        };
        let doctor = self
            .doctor
            .selected_label()
            .ok_or(BookingError::Incomplete(BookingField::Doctor))?
            .to_string();

        let message = confirmation_message(&doctor, date, &time);
        Ok(Confirmation {
            doctor,
            date,
            time,
            message,
        })
    }

    /// Back to the initial empty/disabled state
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
        self.doctor.reset(false);
        self.time.reset(false);
        tracing::debug!("Appointment form reset");
    }

    pub fn view(&self) -> BookingView {
        BookingView {
            specialties: self
                .provider
                .specialties()
                .iter()
                .map(|code| SelectOption::new(code.as_str(), code.as_str()))
                .collect(),
            specialty: self.state.specialty.as_ref().map(|c| c.as_str().to_string()),
            doctor: self.doctor.clone(),
            date_enabled: self.date_enabled(),
            date: self
                .state
                .date
                .map(|d| d.format(super::calendar::PICKER_DATE_FORMAT).to_string()),
            time: self.time.clone(),
        }
    }
}
