//! UI Event Types
//!
//! Defines every event a host page can forward to the components, plus the
//! effects components hand back to the bus.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of a modal element, e.g. `confirmationModal`
pub type ModalId = String;

/// Forms that submit through the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormId {
    Appointment,
    Contact,
    Feedback,
    AddDoctor,
}

/// Keyboard keys the components react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
    Other(String),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Which close control inside a modal was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseKind {
    /// An explicit "Close"/"Done" button
    Button,
    /// The corner `×` glyph
    Glyph,
}

/// Why a modal was hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissCause {
    CloseButton,
    CloseGlyph,
    Backdrop,
    Escape,
    AutoDismiss,
    Programmatic,
}

impl From<CloseKind> for DismissCause {
    fn from(kind: CloseKind) -> Self {
        match kind {
            CloseKind::Button => DismissCause::CloseButton,
            CloseKind::Glyph => DismissCause::CloseGlyph,
        }
    }
}

/// Page regions that pointer events are reported against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Slider,
    Sidebar,
    SidebarToggle,
    MobileSidebarToggle,
    MobileMenuButton,
    DropdownToggle,
    DropdownMenu,
    PasswordToggle { input: String },
    Elsewhere,
}

/// Searchable lists on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    Faq,
    Help,
    Doctors,
}

/// Action buttons on an appointment table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

/// Keys of timers owned by the bus
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerId {
    AutoDismiss(ModalId),
    SliderAdvance,
    FeedbackSubmit,
    HighlightClear(String),
}

/// Routing key for subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Booking,
    Forms,
    Modal,
    Keyboard,
    Accordion,
    Slider,
    Tabs,
    Pointer,
    Search,
    Dashboard,
    Timer,
}

/// Events forwarded by the host page or emitted by components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Specialty select changed (empty string for the placeholder)
    SpecialtyChanged { value: String },
    /// Doctor select changed
    DoctorChanged { value: String },
    /// Date picker reported a pick, formatted `%Y-%m-%d`
    DatePicked { value: String },
    /// Time select changed
    TimeChanged { value: String },

    /// A form's submit event (default submission is always suppressed)
    FormSubmitted { form: FormId },
    /// A form's reset button
    FormReset { form: FormId },
    /// A field's value changed
    FieldInput {
        form: FormId,
        field: String,
        value: String,
    },
    /// A field lost focus
    FieldBlurred { form: FormId, field: String },
    /// Overall rating star picked on the feedback form
    RatingSelected { rating: u8 },

    /// An element flagged with a modal target was activated
    ModalTriggered { modal: ModalId },
    /// A close control was activated; `modal` is its nearest enclosing modal
    CloseControlClicked {
        modal: Option<ModalId>,
        kind: CloseKind,
    },
    /// A click landed inside a modal; `on_backdrop` when the target is the modal root
    ModalClicked { modal: ModalId, on_backdrop: bool },
    /// Request from a component to show a modal
    OpenModal { modal: ModalId },
    /// Request from a component to hide a modal
    CloseModal { modal: ModalId },
    /// Notification that a modal was hidden
    ModalClosed { modal: ModalId, cause: DismissCause },

    /// Document-level keydown; `search` is set when focus is in a search box
    KeyPressed {
        key: Key,
        #[serde(default)]
        search: Option<SearchScope>,
    },

    /// Accordion header activated
    AccordionHeaderActivated { item: usize },
    /// Host measured an accordion panel's natural height
    ContentMeasured { item: usize, height: u32 },

    SliderNext,
    SliderPrev,
    SliderDotClicked { index: usize },

    /// A tab button was activated
    TabSelected { group: String, tab: String },

    /// Generic click, reported by region for outside-click handling
    Click { region: Region },
    PointerEntered { region: Region },
    PointerLeft { region: Region },
    /// Viewport width changed
    Resized { width: u32 },

    /// Search box input
    SearchInput { scope: SearchScope, term: String },
    /// Category/filter button or select
    CategorySelected { scope: SearchScope, category: String },
    /// Topic link or category card pointing at a help section
    TopicLinkClicked { section: String },

    /// Availability switch of a weekday changed
    AvailabilityToggled { day: String, available: bool },
    /// A time-slot button inside a weekday was clicked
    TimeSlotClicked { day: String, time: String },
    /// View, edit or delete button on an appointment row
    AppointmentAction { row: String, action: RowAction },
    /// Confirm button of the delete-appointment dialog
    DeleteConfirmed,
    LogoutRequested,
    LogoutCancelled,
    LogoutConfirmed,

    /// A bus timer reached its deadline
    TimerFired { timer: TimerId },
}

impl UiEvent {
    /// Topic this event is delivered on
    pub fn topic(&self) -> Topic {
        match self {
            UiEvent::SpecialtyChanged { .. }
            | UiEvent::DoctorChanged { .. }
            | UiEvent::DatePicked { .. }
            | UiEvent::TimeChanged { .. } => Topic::Booking,

            UiEvent::FormSubmitted { .. }
            | UiEvent::FormReset { .. }
            | UiEvent::FieldInput { .. }
            | UiEvent::FieldBlurred { .. }
            | UiEvent::RatingSelected { .. } => Topic::Forms,

            UiEvent::ModalTriggered { .. }
            | UiEvent::CloseControlClicked { .. }
            | UiEvent::ModalClicked { .. }
            | UiEvent::OpenModal { .. }
            | UiEvent::CloseModal { .. }
            | UiEvent::ModalClosed { .. } => Topic::Modal,

            UiEvent::KeyPressed { .. } => Topic::Keyboard,

            UiEvent::AccordionHeaderActivated { .. } | UiEvent::ContentMeasured { .. } => {
                Topic::Accordion
            }

            UiEvent::SliderNext | UiEvent::SliderPrev | UiEvent::SliderDotClicked { .. } => {
                Topic::Slider
            }

            UiEvent::TabSelected { .. } => Topic::Tabs,

            UiEvent::Click { .. }
            | UiEvent::PointerEntered { .. }
            | UiEvent::PointerLeft { .. }
            | UiEvent::Resized { .. } => Topic::Pointer,

            UiEvent::SearchInput { .. }
            | UiEvent::CategorySelected { .. }
            | UiEvent::TopicLinkClicked { .. } => Topic::Search,

            UiEvent::AvailabilityToggled { .. }
            | UiEvent::TimeSlotClicked { .. }
            | UiEvent::AppointmentAction { .. }
            | UiEvent::DeleteConfirmed
            | UiEvent::LogoutRequested
            | UiEvent::LogoutCancelled
            | UiEvent::LogoutConfirmed => Topic::Dashboard,

            UiEvent::TimerFired { .. } => Topic::Timer,
        }
    }

    /// Convenience constructor for an Escape keypress outside any search box
    pub fn escape() -> Self {
        UiEvent::KeyPressed {
            key: Key::Escape,
            search: None,
        }
    }
}

/// What a component asks the bus to do after handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Queue a follow-up event in the same dispatch
    Emit(UiEvent),
    /// Arm (or re-arm) a timer `after` from now; `repeat` re-arms it on every fire
    Schedule {
        timer: TimerId,
        after: Duration,
        repeat: bool,
    },
    /// Disarm a timer if present
    Cancel(TimerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type": "specialty_changed", "value": "cardiology"}"#;
        let event: UiEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            UiEvent::SpecialtyChanged {
                value: "cardiology".to_string()
            }
        );
        assert_eq!(event.topic(), Topic::Booking);

        let json = r#"{"type": "key_pressed", "key": "escape"}"#;
        let event: UiEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, UiEvent::escape());
    }

    #[test]
    fn test_close_control_serialization() {
        let event = UiEvent::CloseControlClicked {
            modal: Some("confirmationModal".to_string()),
            kind: CloseKind::Glyph,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"close_control_clicked\""));
        assert!(json.contains("\"kind\":\"glyph\""));
    }

    #[test]
    fn test_dashboard_events() {
        let json = r#"{"type": "appointment_action", "row": "a3", "action": "delete"}"#;
        let event: UiEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            UiEvent::AppointmentAction {
                row: "a3".to_string(),
                action: RowAction::Delete
            }
        );
        assert_eq!(event.topic(), Topic::Dashboard);

        let event: UiEvent = serde_json::from_str(r#"{"type": "delete_confirmed"}"#).unwrap();
        assert_eq!(event, UiEvent::DeleteConfirmed);
        assert_eq!(
            UiEvent::CloseModal {
                modal: "logout-modal".to_string()
            }
            .topic(),
            Topic::Modal
        );
    }

    #[test]
    fn test_key_from_dom_name() {
        assert_eq!(Key::from("Escape"), Key::Escape);
        assert_eq!(Key::from("Esc"), Key::Escape);
        assert_eq!(Key::from("a"), Key::Other("a".to_string()));
    }

    #[test]
    fn test_topics() {
        assert_eq!(
            UiEvent::TimerFired {
                timer: TimerId::SliderAdvance
            }
            .topic(),
            Topic::Timer
        );
        assert_eq!(
            UiEvent::Click {
                region: Region::Elsewhere
            }
            .topic(),
            Topic::Pointer
        );
        assert_eq!(
            UiEvent::FormSubmitted {
                form: FormId::Appointment
            }
            .topic(),
            Topic::Forms
        );
    }
}
