//! Appointment table on the dashboard
//!
//! Rows live in memory. View and edit fill their modals from the row;
//! delete asks for confirmation first and only the confirm button removes
//! the row.

use serde::{Deserialize, Serialize};

use crate::events::{Component, DismissCause, Effect, ModalId, RowAction, Topic, UiEvent};

/// One `tr[data-id]`; `date` is shown as `MM/DD/YYYY`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub id: String,
    pub patient: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl AppointmentRow {
    pub fn new(id: &str, patient: &str, date: &str, time: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            patient: patient.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            status: status.to_string(),
        }
    }
}

/// Values loaded into the edit modal's inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditDraft {
    pub row: String,
    pub patient: String,
    /// Date input value, `YYYY-MM-DD`; unset when the row date has no three parts
    pub date: Option<String>,
    pub time: String,
    pub status: String,
}

/// Modal ids the table opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModals {
    pub view: Option<ModalId>,
    pub edit: Option<ModalId>,
    pub delete: Option<ModalId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentTableView {
    pub rows: Vec<AppointmentRow>,
    pub viewing: Option<AppointmentRow>,
    pub editing: Option<EditDraft>,
    /// Patient named in the delete dialog
    pub delete_patient: Option<String>,
}

/// `3/9/2025` becomes `2025-03-09`
pub fn edit_date(date: &str) -> Option<String> {
    let parts: Vec<&str> = date.trim().split('/').collect();
    match parts.as_slice() {
        [month, day, year] => Some(format!("{}-{:0>2}-{:0>2}", year, month, day)),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentTable {
    rows: Vec<AppointmentRow>,
    modals: TableModals,
    viewing: Option<AppointmentRow>,
    editing: Option<EditDraft>,
    pending_delete: Option<String>,
}

impl AppointmentTable {
    pub fn new(rows: Vec<AppointmentRow>, modals: TableModals) -> Self {
        Self {
            rows,
            modals,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[AppointmentRow] {
        &self.rows
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    fn row(&self, id: &str) -> Option<&AppointmentRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn open(modal: &Option<ModalId>) -> Vec<Effect> {
        match modal {
            Some(modal) => vec![Effect::Emit(UiEvent::OpenModal {
                modal: modal.clone(),
            })],
            None => Vec::new(),
        }
    }

    /// Load the row into the matching modal and open it. Nothing happens
    /// without the modal or for an unknown row.
    pub fn act(&mut self, id: &str, action: RowAction) -> Vec<Effect> {
        let Some(row) = self.row(id).cloned() else {
            tracing::warn!(row = id, ?action, "Unknown appointment row");
            return Vec::new();
        };
        tracing::debug!(row = id, ?action, "Appointment action");

        match action {
            RowAction::View if self.modals.view.is_some() => {
                self.viewing = Some(row);
                Self::open(&self.modals.view)
            }
            RowAction::Edit if self.modals.edit.is_some() => {
                self.editing = Some(EditDraft {
                    date: edit_date(&row.date),
                    row: row.id,
                    patient: row.patient,
                    time: row.time,
                    status: row.status,
                });
                Self::open(&self.modals.edit)
            }
            RowAction::Delete if self.modals.delete.is_some() => {
                self.pending_delete = Some(row.id);
                Self::open(&self.modals.delete)
            }
            _ => Vec::new(),
        }
    }

    /// Remove the row awaiting confirmation and close the dialog
    pub fn confirm_delete(&mut self) -> Vec<Effect> {
        let Some(id) = self.pending_delete.take() else {
            return Vec::new();
        };
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        if self.rows.len() < before {
            tracing::info!(row = %id, "Appointment deleted");
        }

        match &self.modals.delete {
            Some(modal) => vec![Effect::Emit(UiEvent::CloseModal {
                modal: modal.clone(),
            })],
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> AppointmentTableView {
        let delete_patient = self
            .pending_delete
            .as_deref()
            .and_then(|id| self.row(id))
            .map(|row| row.patient.clone());
        AppointmentTableView {
            rows: self.rows.clone(),
            viewing: self.viewing.clone(),
            editing: self.editing.clone(),
            delete_patient,
        }
    }

    fn on_modal_closed(&mut self, modal: &str, cause: DismissCause) {
        let is = |own: &Option<ModalId>| own.as_deref() == Some(modal);
        if is(&self.modals.delete) {
            // Cancel, glyph, backdrop or Escape
            if let Some(id) = self.pending_delete.take() {
                tracing::debug!(row = %id, ?cause, "Delete cancelled");
            }
        } else if is(&self.modals.view) {
            self.viewing = None;
        } else if is(&self.modals.edit) {
            self.editing = None;
        }
    }
}

impl Component for AppointmentTable {
    fn name(&self) -> &'static str {
        "appointment-table"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Dashboard, Topic::Modal]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::AppointmentAction { row, action } => self.act(row, *action),
            UiEvent::DeleteConfirmed => self.confirm_delete(),
            UiEvent::ModalClosed { modal, cause } => {
                self.on_modal_closed(modal, *cause);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}
