//! DOM structure contract
//!
//! Describes which elements a page declares. A component is only mounted
//! when every element it needs is present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::dashboard::{AppointmentRow, AvailabilityDay};
use crate::search::{DoctorCard, FaqGroup, HelpSection};

/// Element ids shared with the markup
pub mod ids {
    pub const SPECIALTY_SELECT: &str = "specialty";
    pub const DOCTOR_SELECT: &str = "doctor";
    pub const DATE_INPUT: &str = "appointmentDate";
    pub const TIME_SELECT: &str = "appointmentTime";
    pub const APPOINTMENT_FORM: &str = "appointmentForm";
    pub const CONFIRMATION_MODAL: &str = "confirmationModal";
    pub const CONFIRMATION_MESSAGE: &str = "confirmationMessage";

    pub const CONTACT_FORM: &str = "contactForm";
    /// Created on mount; the markup does not declare it
    pub const CONTACT_SUCCESS_MODAL: &str = "contactSuccessModal";

    pub const FEEDBACK_FORM: &str = "feedbackForm";
    pub const FEEDBACK_SUCCESS_MODAL: &str = "feedbackSuccessModal";
    pub const RATING_TEXT: &str = "ratingText";

    pub const FAQ_SEARCH: &str = "faqSearch";
    pub const HELP_SEARCH: &str = "helpSearch";
    pub const DOCTOR_SEARCH: &str = "doctor-search";
    pub const SPECIALTY_FILTER: &str = "specialty-filter";

    pub const VIEW_APPOINTMENT_MODAL: &str = "view-appointment-modal";
    pub const EDIT_APPOINTMENT_MODAL: &str = "edit-appointment-modal";
    pub const DELETE_APPOINTMENT_MODAL: &str = "delete-appointment-modal";
    pub const LOGOUT_BUTTON: &str = "logout-btn";
    pub const LOGOUT_MODAL: &str = "logout-modal";
    pub const ADD_DOCTOR_FORM: &str = "add-doctor-form";
}

/// A `.tab-btn` group and the panel ids it switches between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabGroupSpec {
    pub group: String,
    pub tabs: Vec<String>,
}

/// What the page contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageElements {
    /// Ids of elements present on the page
    pub ids: BTreeSet<String>,
    /// Ids of `.modal` elements
    pub modals: Vec<String>,
    /// Number of `.accordion-header` / `.faq-question` items
    pub accordion_items: usize,
    /// Number of `.testimonial-card` slides
    pub slides: usize,
    /// Slider track, dots and both nav buttons are all present
    pub slider_controls: bool,
    pub tab_groups: Vec<TabGroupSpec>,
    /// Password inputs that have a `.toggle-password` button
    pub password_inputs: Vec<String>,
    /// `.sidebar` with its `.sidebar-toggle`
    pub sidebar: bool,
    /// `.user-dropdown-toggle` with its menu
    pub dropdown: bool,
    /// `.mobile-menu-btn`
    pub mobile_menu: bool,
    pub faq: Vec<FaqGroup>,
    pub help: Vec<HelpSection>,
    pub doctor_cards: Vec<DoctorCard>,
    /// `.availability-day` blocks
    pub availability: Vec<AvailabilityDay>,
    /// Rows of the appointments table
    pub appointment_rows: Vec<AppointmentRow>,
}

impl PageElements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a page description from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a page description from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn has_all(&self, ids: &[&str]) -> bool {
        ids.iter().all(|id| self.has(id))
    }

    pub fn has_modal(&self, id: &str) -> bool {
        self.modals.iter().any(|m| m == id)
    }

    /// Builder method: declare element ids
    pub fn with_ids<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.ids.extend(ids.into_iter().map(str::to_string));
        self
    }

    /// Builder method: declare a modal
    pub fn with_modal(mut self, id: &str) -> Self {
        if !self.has_modal(id) {
            self.modals.push(id.to_string());
        }
        self
    }

    pub fn with_accordion(mut self, items: usize) -> Self {
        self.accordion_items = items;
        self
    }

    pub fn with_slider(mut self, slides: usize) -> Self {
        self.slides = slides;
        self.slider_controls = true;
        self
    }

    pub fn with_tab_group<'a>(
        mut self,
        group: &str,
        tabs: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.tab_groups.push(TabGroupSpec {
            group: group.to_string(),
            tabs: tabs.into_iter().map(str::to_string).collect(),
        });
        self
    }

    pub fn with_password_input(mut self, input: &str) -> Self {
        self.password_inputs.push(input.to_string());
        self
    }

    pub fn with_dashboard_chrome(mut self) -> Self {
        self.sidebar = true;
        self.dropdown = true;
        self
    }

    pub fn with_mobile_menu(mut self) -> Self {
        self.mobile_menu = true;
        self
    }

    pub fn with_faq(mut self, groups: Vec<FaqGroup>) -> Self {
        self.faq = groups;
        self.ids.insert(ids::FAQ_SEARCH.to_string());
        self
    }

    pub fn with_help(mut self, sections: Vec<HelpSection>) -> Self {
        self.help = sections;
        self.ids.insert(ids::HELP_SEARCH.to_string());
        self
    }

    pub fn with_doctor_cards(mut self, cards: Vec<DoctorCard>) -> Self {
        self.doctor_cards = cards;
        self.ids.insert(ids::DOCTOR_SEARCH.to_string());
        self
    }

    pub fn with_availability(mut self, days: Vec<AvailabilityDay>) -> Self {
        self.availability = days;
        self
    }

    pub fn with_appointment_rows(mut self, rows: Vec<AppointmentRow>) -> Self {
        self.appointment_rows = rows;
        self
    }

    /// The appointment page: cascading selects, form, confirmation modal
    pub fn appointment_page() -> Self {
        Self::new()
            .with_ids([
                ids::SPECIALTY_SELECT,
                ids::DOCTOR_SELECT,
                ids::DATE_INPUT,
                ids::TIME_SELECT,
                ids::APPOINTMENT_FORM,
                ids::CONFIRMATION_MESSAGE,
            ])
            .with_modal(ids::CONFIRMATION_MODAL)
    }
}
