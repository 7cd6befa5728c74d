//! Dashboard
//!
//! Chart specifications with mock data and the [`ChartRenderer`] seam, plus
//! the admin widgets: availability editor, appointment table, logout
//! confirmation and the add-doctor form.

pub mod admin;
pub mod appointments;
pub mod availability;
pub mod charts;

pub use admin::{
    AddDoctorForm, AddDoctorView, LogoutConfirm, LogoutView, NewDoctor, ADD_DOCTOR_RULES,
    DOCTOR_ADDED_MESSAGE, LOGIN_PAGE, MISSING_FIELDS_MESSAGE,
};
pub use appointments::{
    edit_date, AppointmentRow, AppointmentTable, AppointmentTableView, EditDraft, TableModals,
};
pub use availability::{AvailabilityDay, AvailabilityDayView, AvailabilityEditor, SlotToggle};
pub use charts::{
    default_charts, init_charts, ChartError, ChartKind, ChartRenderer, ChartReport, ChartSpec,
    Dataset, LegendPosition, APPOINTMENTS_CANVAS, DEPARTMENT_CANVAS, REVENUE_CANVAS,
};
