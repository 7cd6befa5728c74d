//! Contact and feedback forms
//!
//! Both forms keep their values and inline error messages in a
//! [`FieldSet`]; validation never returns `Err`.

pub mod contact;
pub mod feedback;
pub mod validation;

pub use contact::{ContactForm, ContactView, CONTACT_RULES};
pub use feedback::{rating_label, FeedbackForm, FeedbackView, SubmitState, FEEDBACK_RULES};
pub use validation::{is_valid_email, is_valid_phone, FieldKind, FieldRule, FieldSet};
