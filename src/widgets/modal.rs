//! Generic Modal Manager
//!
//! Tracks a visibility flag per modal id. Modals are independent: there is
//! no stack and no z-order, and opening one never hides another.
//!
//! Hiding paths:
//! - a close control hides its nearest enclosing modal
//! - a click on the modal root (the backdrop) hides it
//! - Escape hides every modal currently shown
//! - an optional per-modal auto-dismiss timer
//!
//! Every actual hide is announced with [`UiEvent::ModalClosed`] so that
//! forms can react to how their modal went away.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::error::{WidgetError, WidgetResult};
use crate::events::{Component, DismissCause, Effect, Key, ModalId, TimerId, Topic, UiEvent};

#[derive(Debug, Clone, Default)]
struct ModalState {
    visible: bool,
    auto_dismiss: Option<Duration>,
}

/// Visibility of one modal, as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub id: ModalId,
    pub visible: bool,
}

/// Visibility flags for every modal on the page
#[derive(Debug, Default)]
pub struct ModalManager {
    modals: BTreeMap<ModalId, ModalState>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: register a modal, hidden
    pub fn with_modal(mut self, id: impl Into<ModalId>, auto_dismiss: Option<Duration>) -> Self {
        self.add_modal(id, auto_dismiss);
        self
    }

    /// Register a modal, hidden. Re-registering keeps visibility and
    /// replaces the auto-dismiss delay.
    pub fn add_modal(&mut self, id: impl Into<ModalId>, auto_dismiss: Option<Duration>) {
        let entry = self.modals.entry(id.into()).or_default();
        entry.auto_dismiss = auto_dismiss.filter(|delay| !delay.is_zero());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modals.contains_key(id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.modals.get(id).map(|m| m.visible).unwrap_or(false)
    }

    /// Ids of the modals currently shown
    pub fn visible_ids(&self) -> Vec<&str> {
        self.modals
            .iter()
            .filter(|(_, m)| m.visible)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Show a modal; arms its auto-dismiss timer if it has one
    pub fn open(&mut self, id: &str) -> WidgetResult<Vec<Effect>> {
        let modal = self
            .modals
            .get_mut(id)
            .ok_or_else(|| WidgetError::UnknownModal(id.to_string()))?;

        modal.visible = true;
        tracing::debug!(modal = %id, "Modal opened");

        Ok(match modal.auto_dismiss {
            Some(after) => vec![Effect::Schedule {
                timer: TimerId::AutoDismiss(id.to_string()),
                after,
                repeat: false,
            }],
            None => Vec::new(),
        })
    }

    /// Hide a modal. Hiding an already hidden modal produces no effects.
    pub fn close(&mut self, id: &str, cause: DismissCause) -> WidgetResult<Vec<Effect>> {
        let modal = self
            .modals
            .get_mut(id)
            .ok_or_else(|| WidgetError::UnknownModal(id.to_string()))?;

        if !modal.visible {
            return Ok(Vec::new());
        }
        modal.visible = false;
        tracing::debug!(modal = %id, ?cause, "Modal closed");

        let mut effects = Vec::with_capacity(2);
        if modal.auto_dismiss.is_some() && cause != DismissCause::AutoDismiss {
            effects.push(Effect::Cancel(TimerId::AutoDismiss(id.to_string())));
        }
        effects.push(Effect::Emit(UiEvent::ModalClosed {
            modal: id.to_string(),
            cause,
        }));
        Ok(effects)
    }

    /// Hide every visible modal
    pub fn close_all(&mut self, cause: DismissCause) -> Vec<Effect> {
        let visible: Vec<ModalId> = self
            .modals
            .iter()
            .filter(|(_, m)| m.visible)
            .map(|(id, _)| id.clone())
            .collect();

        let mut effects = Vec::new();
        for id in visible {
            // Ids come from the map itself
            if let Ok(mut closed) = self.close(&id, cause) {
                effects.append(&mut closed);
            }
        }
        effects
    }

    pub fn view(&self) -> Vec<ModalView> {
        self.modals
            .iter()
            .map(|(id, m)| ModalView {
                id: id.clone(),
                visible: m.visible,
            })
            .collect()
    }

    fn log_unknown(result: WidgetResult<Vec<Effect>>) -> Vec<Effect> {
        result.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Modal action ignored");
            Vec::new()
        })
    }
}

impl Component for ModalManager {
    fn name(&self) -> &'static str {
        "modals"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Modal, Topic::Keyboard, Topic::Timer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::ModalTriggered { modal } | UiEvent::OpenModal { modal } => {
                Self::log_unknown(self.open(modal))
            }
            UiEvent::CloseControlClicked {
                modal: Some(modal),
                kind,
            } => Self::log_unknown(self.close(modal, (*kind).into())),
            UiEvent::CloseModal { modal } => {
                Self::log_unknown(self.close(modal, DismissCause::Programmatic))
            }
            UiEvent::ModalClicked {
                modal,
                on_backdrop: true,
            } => Self::log_unknown(self.close(modal, DismissCause::Backdrop)),
            UiEvent::KeyPressed {
                key: Key::Escape, ..
            } => self.close_all(DismissCause::Escape),
            UiEvent::TimerFired {
                timer: TimerId::AutoDismiss(modal),
            } => Self::log_unknown(self.close(modal, DismissCause::AutoDismiss)),
            _ => Vec::new(),
        }
    }
}
