//! Submission & confirmation flow
//!
//! Binds [`BookingForm`] to the event bus. Submission is always handled
//! locally: the confirmation text is written to the message area and the
//! confirmation modal is requested from the modal manager.
//!
//! The explicit close button resets the form. Any other dismissal only
//! hides the modal.

use serde::Serialize;
use std::rc::Rc;

use super::calendar::Clock;
use super::form::{BookingForm, BookingView, Confirmation};
use crate::events::{Component, DismissCause, Effect, FormId, ModalId, Topic, UiEvent};

/// Rendered state of the appointment page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentView {
    pub form: BookingView,
    /// Text of the confirmation message area
    pub message: Option<String>,
}

/// Appointment form + confirmation modal
pub struct AppointmentFlow {
    form: BookingForm,
    clock: Rc<dyn Clock>,
    confirmation_modal: Option<ModalId>,
    last_confirmation: Option<Confirmation>,
}

impl AppointmentFlow {
    /// `confirmation_modal` is `None` when the page has no confirmation overlay
    pub fn new(form: BookingForm, clock: Rc<dyn Clock>, confirmation_modal: Option<ModalId>) -> Self {
        Self {
            form,
            clock,
            confirmation_modal,
            last_confirmation: None,
        }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn last_confirmation(&self) -> Option<&Confirmation> {
        self.last_confirmation.as_ref()
    }

    pub fn view(&self) -> AppointmentView {
        AppointmentView {
            form: self.form.view(),
            message: self.last_confirmation.as_ref().map(|c| c.message.clone()),
        }
    }

    fn on_submit(&mut self) -> Vec<Effect> {
        match self.form.submit() {
            Ok(confirmation) => {
                tracing::info!(
                    doctor = %confirmation.doctor,
                    date = %confirmation.date,
                    time = %confirmation.time,
                    "Appointment confirmed"
                );
                self.last_confirmation = Some(confirmation);

                match &self.confirmation_modal {
                    Some(modal) => vec![Effect::Emit(UiEvent::OpenModal {
                        modal: modal.clone(),
                    })],
                    None => Vec::new(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Appointment submission blocked");
                Vec::new()
            }
        }
    }

    fn on_modal_closed(&mut self, modal: &str, cause: DismissCause) {
        if self.confirmation_modal.as_deref() != Some(modal) {
            return;
        }
        if cause == DismissCause::CloseButton {
            self.form.reset();
        }
    }
}

impl Component for AppointmentFlow {
    fn name(&self) -> &'static str {
        "appointment"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Booking, Topic::Forms, Topic::Modal]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        let result = match event {
            UiEvent::SpecialtyChanged { value } => {
                self.form.select_specialty(value);
                Ok(())
            }
            UiEvent::DoctorChanged { value } => self.form.select_doctor(value),
            UiEvent::DatePicked { value } => self.form.pick_date_str(value, self.clock.today()),
            UiEvent::TimeChanged { value } => self.form.select_time(value),
            UiEvent::FormSubmitted {
                form: FormId::Appointment,
            } => return self.on_submit(),
            UiEvent::ModalClosed { modal, cause } => {
                self.on_modal_closed(modal, *cause);
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Appointment field change rejected");
        }
        Vec::new()
    }
}
