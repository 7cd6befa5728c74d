//! Booking error types

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// The four cascading fields of the appointment form, upstream first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookingField {
    Specialty,
    Doctor,
    Date,
    Time,
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingField::Specialty => write!(f, "specialty"),
            BookingField::Doctor => write!(f, "doctor"),
            BookingField::Date => write!(f, "date"),
            BookingField::Time => write!(f, "time"),
        }
    }
}

/// Why the date picker refuses a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    Past,
    Weekend,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Past => write!(f, "date is in the past"),
            UnavailableReason::Weekend => write!(f, "weekends are not bookable"),
        }
    }
}

/// Errors raised by booking transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The field is disabled because an upstream field is empty
    #[error("Field is disabled: {0}")]
    FieldDisabled(BookingField),

    /// The value is not among the field's current options
    #[error("Unknown {field} option: {value:?}")]
    UnknownOption { field: BookingField, value: String },

    /// The date picker would not offer this day
    #[error("Date {date} is not selectable: {reason}")]
    DateUnavailable {
        date: NaiveDate,
        reason: UnavailableReason,
    },

    /// The picker string could not be parsed
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Submission attempted with a required field still empty
    #[error("Missing selection: {0}")]
    Incomplete(BookingField),
}

/// Result type alias for booking operations
pub type BookingResult<T> = Result<T, BookingError>;
