//! Doctor Directory
//!
//! Reference data for appointment booking:
//!
//! - **types**: `SpecialtyCode`, `Doctor`, `TimeSlot`
//! - **provider**: the `ScheduleProvider` lookup seam and `StaticDirectory`
//! - **error**: directory loading errors

pub mod error;
pub mod provider;
pub mod types;

pub use error::DirectoryError;
pub use provider::{ScheduleProvider, StaticDirectory};
pub use types::{default_time_slots, Doctor, SpecialtyCode, TimeSlot, DEFAULT_TIME_SLOTS};
