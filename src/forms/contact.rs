//! Contact form
//!
//! Fields validate on blur and all together on submit. A valid submit shows
//! the success modal and clears the form.

use serde::Serialize;

use super::validation::{FieldKind, FieldRule, FieldSet};
use crate::events::{Component, Effect, FormId, ModalId, Topic, UiEvent};

pub const SUCCESS_TITLE: &str = "Message Sent!";
pub const SUCCESS_MESSAGE: &str =
    "Thank you for contacting us. We will get back to you as soon as possible.";

pub const CONTACT_RULES: [FieldRule; 5] = [
    FieldRule::required("name", FieldKind::Text),
    FieldRule::required("email", FieldKind::Email),
    FieldRule::optional("phone", FieldKind::Tel),
    FieldRule::required("subject", FieldKind::Text),
    FieldRule::required("message", FieldKind::TextArea),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    #[serde(flatten)]
    pub fields: FieldSet,
    pub sent: u32,
}

pub struct ContactForm {
    fields: FieldSet,
    success_modal: Option<ModalId>,
    sent: u32,
}

impl ContactForm {
    pub fn new(success_modal: Option<ModalId>) -> Self {
        Self {
            fields: FieldSet::default(),
            success_modal,
            sent: 0,
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Messages sent since mount
    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn input(&mut self, field: &str, value: &str) {
        self.fields.set(field, value);
    }

    /// Validate one field; unknown fields always pass
    pub fn blur(&mut self, field: &str) -> bool {
        match CONTACT_RULES.iter().find(|rule| rule.name == field) {
            Some(rule) => self.fields.validate(rule),
            None => true,
        }
    }

    /// Validate everything; on success clear the form and report the modal to show
    pub fn submit(&mut self) -> Vec<Effect> {
        if !self.fields.validate_all(&CONTACT_RULES) {
            tracing::debug!(errors = self.fields.errors.len(), "Contact form invalid");
            return Vec::new();
        }

        self.sent += 1;
        self.fields.clear();
        tracing::info!("Contact message accepted");

        match &self.success_modal {
            Some(modal) => vec![Effect::Emit(UiEvent::OpenModal {
                modal: modal.clone(),
            })],
            None => Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.fields.clear();
    }

    pub fn view(&self) -> ContactView {
        ContactView {
            fields: self.fields.clone(),
            sent: self.sent,
        }
    }
}

impl Component for ContactForm {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Forms]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::FieldInput {
                form: FormId::Contact,
                field,
                value,
            } => self.input(field, value),
            UiEvent::FieldBlurred {
                form: FormId::Contact,
                field,
            } => {
                self.blur(field);
            }
            UiEvent::FormSubmitted {
                form: FormId::Contact,
            } => return self.submit(),
            UiEvent::FormReset {
                form: FormId::Contact,
            } => self.reset(),
            _ => {}
        }
        Vec::new()
    }
}
