//! Patient feedback form
//!
//! Required visit details, a 1-5 overall rating, privacy consent and an
//! optional email. A valid submit waits a simulated round trip before the
//! success modal opens; closing that modal through one of its close
//! controls clears the form.

use serde::Serialize;
use std::time::Duration;

use super::validation::{FieldKind, FieldRule, FieldSet};
use crate::events::{Component, DismissCause, Effect, FormId, ModalId, TimerId, Topic, UiEvent};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

pub const RATING_FIELD: &str = "rating";
pub const PRIVACY_FIELD: &str = "privacyConsent";

pub const RATING_MESSAGE: &str = "Please select an overall rating";
pub const PRIVACY_MESSAGE: &str = "You must agree to the Privacy Policy";
pub const NO_RATING_LABEL: &str = "Select a rating";

pub const FEEDBACK_RULES: [FieldRule; 4] = [
    FieldRule::required("visitType", FieldKind::Select).with_message("Please select a visit type"),
    FieldRule::required("visitDate", FieldKind::Date)
        .with_message("Please enter the date of your visit"),
    FieldRule::required("department", FieldKind::Select)
        .with_message("Please select a department"),
    FieldRule::optional("email", FieldKind::Email),
];

/// Text shown next to the star rating
pub fn rating_label(rating: Option<u8>) -> &'static str {
    match rating {
        Some(5) => "Excellent",
        Some(4) => "Very Good",
        Some(3) => "Good",
        Some(2) => "Fair",
        Some(1) => "Poor",
        _ => NO_RATING_LABEL,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    #[default]
    Editing,
    /// Waiting on the simulated round trip
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    #[serde(flatten)]
    pub fields: FieldSet,
    pub rating: Option<u8>,
    pub rating_text: &'static str,
    pub privacy_consent: bool,
    pub state: SubmitState,
}

pub struct FeedbackForm {
    fields: FieldSet,
    rating: Option<u8>,
    privacy_consent: bool,
    state: SubmitState,
    submit_delay: Duration,
    success_modal: Option<ModalId>,
}

impl FeedbackForm {
    pub fn new(success_modal: Option<ModalId>, submit_delay: Duration) -> Self {
        Self {
            fields: FieldSet::default(),
            rating: None,
            privacy_consent: false,
            state: SubmitState::Editing,
            submit_delay,
            success_modal,
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Record a field value. The consent checkbox reports `true`/`on` when checked.
    pub fn input(&mut self, field: &str, value: &str) {
        if field == PRIVACY_FIELD {
            self.privacy_consent = matches!(value.trim(), "true" | "on" | "checked");
        } else {
            self.fields.set(field, value);
        }
    }

    /// Pick the overall rating; clears its error
    pub fn select_rating(&mut self, rating: u8) -> bool {
        if !(1..=5).contains(&rating) {
            tracing::warn!(rating, "Rating out of range");
            return false;
        }
        self.rating = Some(rating);
        self.fields.clear_error(RATING_FIELD);
        true
    }

    /// Check every rule, replacing all previous messages
    pub fn validate(&mut self) -> bool {
        self.fields.errors.clear();
        let mut valid = self.fields.validate_all(&FEEDBACK_RULES);

        if self.rating.is_none() {
            self.fields.set_error(RATING_FIELD, RATING_MESSAGE);
            valid = false;
        }
        if !self.privacy_consent {
            self.fields.set_error(PRIVACY_FIELD, PRIVACY_MESSAGE);
            valid = false;
        }
        valid
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        if self.state == SubmitState::Submitting {
            tracing::debug!("Feedback already submitting");
            return Vec::new();
        }
        if !self.validate() {
            tracing::debug!(errors = self.fields.errors.len(), "Feedback form invalid");
            return Vec::new();
        }

        self.state = SubmitState::Submitting;
        vec![Effect::Schedule {
            timer: TimerId::FeedbackSubmit,
            after: self.submit_delay,
            repeat: false,
        }]
    }

    /// The simulated round trip finished
    fn complete(&mut self) -> Vec<Effect> {
        if self.state != SubmitState::Submitting {
            return Vec::new();
        }
        self.state = SubmitState::Submitted;
        tracing::info!(rating = ?self.rating, "Feedback submitted");

        match &self.success_modal {
            Some(modal) => vec![Effect::Emit(UiEvent::OpenModal {
                modal: modal.clone(),
            })],
            None => Vec::new(),
        }
    }

    /// Clear values, rating and errors
    pub fn reset(&mut self) -> Vec<Effect> {
        let pending = self.state == SubmitState::Submitting;
        self.fields.clear();
        self.rating = None;
        self.privacy_consent = false;
        self.state = SubmitState::Editing;

        if pending {
            vec![Effect::Cancel(TimerId::FeedbackSubmit)]
        } else {
            Vec::new()
        }
    }

    pub fn view(&self) -> FeedbackView {
        FeedbackView {
            fields: self.fields.clone(),
            rating: self.rating,
            rating_text: rating_label(self.rating),
            privacy_consent: self.privacy_consent,
            state: self.state,
        }
    }
}

impl Component for FeedbackForm {
    fn name(&self) -> &'static str {
        "feedback-form"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Forms, Topic::Modal, Topic::Timer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::FieldInput {
                form: FormId::Feedback,
                field,
                value,
            } => self.input(field, value),
            UiEvent::RatingSelected { rating } => {
                self.select_rating(*rating);
            }
            UiEvent::FormSubmitted {
                form: FormId::Feedback,
            } => return self.submit(),
            UiEvent::FormReset {
                form: FormId::Feedback,
            } => return self.reset(),
            UiEvent::TimerFired {
                timer: TimerId::FeedbackSubmit,
            } => return self.complete(),
            UiEvent::ModalClosed { modal, cause }
                if self.success_modal.as_deref() == Some(modal.as_str())
                    && matches!(cause, DismissCause::CloseButton | DismissCause::CloseGlyph) =>
            {
                return self.reset();
            }
            _ => {}
        }
        Vec::new()
    }
}
