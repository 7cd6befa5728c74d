//! Dashboard account actions: logout confirmation and the add-doctor form

use serde::Serialize;

use crate::events::{Component, Effect, FormId, ModalId, Topic, UiEvent};
use crate::forms::{FieldKind, FieldRule, FieldSet};

/// Where a confirmed logout navigates
pub const LOGIN_PAGE: &str = "login.html";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const DOCTOR_ADDED_MESSAGE: &str = "Doctor added successfully!";

pub const ADD_DOCTOR_RULES: [FieldRule; 4] = [
    FieldRule::required("doctor-name", FieldKind::Text).with_message(MISSING_FIELDS_MESSAGE),
    FieldRule::required("doctor-specialty", FieldKind::Select)
        .with_message(MISSING_FIELDS_MESSAGE),
    FieldRule::required("doctor-email", FieldKind::Text).with_message(MISSING_FIELDS_MESSAGE),
    FieldRule::required("doctor-phone", FieldKind::Text).with_message(MISSING_FIELDS_MESSAGE),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutView {
    /// Set once logout is confirmed
    pub redirect: Option<&'static str>,
}

/// `.logout-btn` with its confirmation modal
#[derive(Debug, Clone)]
pub struct LogoutConfirm {
    modal: ModalId,
    confirmed: bool,
}

impl LogoutConfirm {
    pub fn new(modal: impl Into<ModalId>) -> Self {
        Self {
            modal: modal.into(),
            confirmed: false,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn view(&self) -> LogoutView {
        LogoutView {
            redirect: self.confirmed.then_some(LOGIN_PAGE),
        }
    }
}

impl Component for LogoutConfirm {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Dashboard]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::LogoutRequested => vec![Effect::Emit(UiEvent::OpenModal {
                modal: self.modal.clone(),
            })],
            UiEvent::LogoutCancelled => vec![Effect::Emit(UiEvent::CloseModal {
                modal: self.modal.clone(),
            })],
            UiEvent::LogoutConfirmed => {
                self.confirmed = true;
                tracing::info!(redirect = LOGIN_PAGE, "Logging out");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

/// A doctor accepted by the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddDoctorView {
    #[serde(flatten)]
    pub fields: FieldSet,
    /// Alert text after the last submit
    pub alert: Option<&'static str>,
    pub added: Vec<NewDoctor>,
}

/// `#add-doctor-form`: every field required, no format checks
#[derive(Debug, Clone, Default)]
pub struct AddDoctorForm {
    fields: FieldSet,
    alert: Option<&'static str>,
    added: Vec<NewDoctor>,
}

impl AddDoctorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn added(&self) -> &[NewDoctor] {
        &self.added
    }

    pub fn input(&mut self, field: &str, value: &str) {
        self.fields.set(field, value);
    }

    /// Accept the doctor and clear the form, or keep the values and alert
    pub fn submit(&mut self) -> bool {
        if !self.fields.validate_all(&ADD_DOCTOR_RULES) {
            self.alert = Some(MISSING_FIELDS_MESSAGE);
            return false;
        }

        let doctor = NewDoctor {
            name: self.fields.value("doctor-name").trim().to_string(),
            specialty: self.fields.value("doctor-specialty").trim().to_string(),
            email: self.fields.value("doctor-email").trim().to_string(),
            phone: self.fields.value("doctor-phone").trim().to_string(),
        };
        tracing::info!(name = %doctor.name, specialty = %doctor.specialty, "Doctor added");
        self.added.push(doctor);
        self.fields.clear();
        self.alert = Some(DOCTOR_ADDED_MESSAGE);
        true
    }

    pub fn view(&self) -> AddDoctorView {
        AddDoctorView {
            fields: self.fields.clone(),
            alert: self.alert,
            added: self.added.clone(),
        }
    }
}

impl Component for AddDoctorForm {
    fn name(&self) -> &'static str {
        "add-doctor-form"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Forms]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::FieldInput {
                form: FormId::AddDoctor,
                field,
                value,
            } => self.input(field, value),
            UiEvent::FormSubmitted {
                form: FormId::AddDoctor,
            } => {
                self.submit();
            }
            UiEvent::FormReset {
                form: FormId::AddDoctor,
            } => {
                self.fields.clear();
                self.alert = None;
            }
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut AddDoctorForm, values: &[(&str, &str)]) {
        for (field, value) in values {
            form.handle(&UiEvent::FieldInput {
                form: FormId::AddDoctor,
                field: field.to_string(),
                value: value.to_string(),
            });
        }
    }

    #[test]
    fn test_logout_flow() {
        let mut logout = LogoutConfirm::new("logout-modal");
        assert_eq!(
            logout.handle(&UiEvent::LogoutRequested),
            vec![Effect::Emit(UiEvent::OpenModal {
                modal: "logout-modal".into()
            })]
        );
        assert_eq!(
            logout.handle(&UiEvent::LogoutCancelled),
            vec![Effect::Emit(UiEvent::CloseModal {
                modal: "logout-modal".into()
            })]
        );
        assert_eq!(logout.view().redirect, None);

        logout.handle(&UiEvent::LogoutConfirmed);
        assert!(logout.is_confirmed());
        assert_eq!(logout.view().redirect, Some(LOGIN_PAGE));
    }

    #[test]
    fn test_add_doctor_requires_every_field() {
        let mut form = AddDoctorForm::new();
        fill(
            &mut form,
            &[
                ("doctor-name", "Dr. Ada Park"),
                ("doctor-specialty", "neurology"),
                ("doctor-email", "ada@example.com"),
                ("doctor-phone", "   "),
            ],
        );
        form.handle(&UiEvent::FormSubmitted {
            form: FormId::AddDoctor,
        });

        let view = form.view();
        assert_eq!(view.alert, Some(MISSING_FIELDS_MESSAGE));
        assert!(view.added.is_empty());
        assert_eq!(form.fields().value("doctor-name"), "Dr. Ada Park");
        assert_eq!(form.fields().error("doctor-phone"), Some(MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn test_add_doctor_success_resets() {
        let mut form = AddDoctorForm::new();
        fill(
            &mut form,
            &[
                ("doctor-name", "Dr. Ada Park"),
                ("doctor-specialty", "neurology"),
                ("doctor-email", "ada@example.com"),
                ("doctor-phone", "555-0100"),
            ],
        );
        assert!(form.submit());

        assert_eq!(form.view().alert, Some(DOCTOR_ADDED_MESSAGE));
        assert_eq!(form.added()[0].specialty, "neurology");
        assert!(form.fields().values.is_empty());
    }
}
