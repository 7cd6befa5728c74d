//! Appointment Booking
//!
//! The cascading appointment-selection workflow:
//!
//! - **selection**: `SelectionState` and the dependent `SelectField`
//! - **calendar**: date policy (no past days, no weekends), picker config, formatting
//! - **form**: `BookingForm`, the cascading select controller
//! - **flow**: `AppointmentFlow`, submission and the confirmation modal
//! - **error**: error types
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use chrono::NaiveDate;
//! use medibook::booking::BookingForm;
//! use medibook::directory::StaticDirectory;
//!
//! let mut form = BookingForm::new(Rc::new(StaticDirectory::builtin()));
//! let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//!
//! form.select_specialty("cardiology");
//! form.select_doctor("c1").unwrap();
//! form.pick_date_str("2025-03-10", today).unwrap();
//! form.select_time("09:00 AM").unwrap();
//!
//! let confirmation = form.submit().unwrap();
//! assert_eq!(
//!     confirmation.message,
//!     "Your appointment with Dr. John Smith on Monday, March 10, 2025 at 09:00 AM is confirmed."
//! );
//! ```

pub mod calendar;
pub mod error;
pub mod flow;
pub mod form;
pub mod selection;

pub use calendar::{
    format_long_date, is_weekend, parse_picker_date, Clock, DatePickerConfig, DatePolicy,
    FixedClock, SystemClock,
};
pub use error::{BookingError, BookingField, BookingResult, UnavailableReason};
pub use flow::{AppointmentFlow, AppointmentView};
pub use form::{confirmation_message, BookingForm, BookingView, Confirmation};
pub use selection::{SelectField, SelectOption, SelectionState};
