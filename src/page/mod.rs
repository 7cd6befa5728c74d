//! Page assembly
//!
//! [`Page`] mounts every component whose elements the page declares,
//! registers them on one [`EventBus`] and renders their combined view.
//! Components whose elements are missing are skipped, not errors.
//!
//! # Example
//!
//! ```rust
//! use medibook::config::Config;
//! use medibook::events::{FormId, UiEvent};
//! use medibook::page::{Page, PageElements};
//!
//! let mut config = Config::default();
//! config.booking.today = chrono::NaiveDate::from_ymd_opt(2025, 3, 3);
//!
//! let mut page = Page::from_config(PageElements::appointment_page(), &config).unwrap();
//! for event in [
//!     UiEvent::SpecialtyChanged { value: "cardiology".into() },
//!     UiEvent::DoctorChanged { value: "c1".into() },
//!     UiEvent::DatePicked { value: "2025-03-10".into() },
//!     UiEvent::TimeChanged { value: "09:00 AM".into() },
//!     UiEvent::FormSubmitted { form: FormId::Appointment },
//! ] {
//!     page.dispatch(event);
//! }
//!
//! let view = page.render();
//! assert!(view.modals.iter().any(|m| m.id == "confirmationModal" && m.visible));
//! ```

pub mod elements;
pub mod script;

use serde::Serialize;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::booking::{AppointmentFlow, AppointmentView, BookingForm, Clock, DatePickerConfig};
use crate::config::Config;
use crate::dashboard::{
    default_charts, init_charts, AddDoctorForm, AddDoctorView, AppointmentTable,
    AppointmentTableView, AvailabilityDayView, AvailabilityEditor, ChartRenderer, ChartReport,
    LogoutConfirm, LogoutView, TableModals,
};
use crate::directory::{DirectoryError, ScheduleProvider};
use crate::events::{self, Component, DispatchReport, DriverStats, EventBus, UiEvent};
use crate::forms::{ContactForm, ContactView, FeedbackForm, FeedbackView};
use crate::search::{DoctorFilter, DoctorFilterView, FaqSearch, FaqView, HelpSearch, HelpView};
use crate::widgets::{
    Accordion, AccordionItemView, Dropdown, DropdownView, MobileMenu, MobileMenuView,
    ModalManager, ModalView, PasswordToggle, PasswordToggleView, Sidebar, SidebarView, Slider,
    SliderView, TabGroup, TabGroupView,
};

pub use elements::{ids, PageElements, TabGroupSpec};
pub use script::{parse_script, replay, ScriptError, ScriptStep};

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Everything the host needs to update the DOM
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<AppointmentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_picker: Option<DatePickerConfig>,
    pub modals: Vec<ModalView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accordion: Option<Vec<AccordionItemView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider: Option<SliderView>,
    pub tabs: Vec<TabGroupView>,
    pub passwords: Vec<PasswordToggleView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<SidebarView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown: Option<DropdownView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_menu: Option<MobileMenuView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<HelpView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctors: Option<DoctorFilterView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<AvailabilityDayView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointments: Option<AppointmentTableView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout: Option<LogoutView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_doctor: Option<AddDoctorView>,
}

type Shared<T> = Rc<RefCell<T>>;

fn mount<T: Component + 'static>(bus: &mut EventBus, component: T) -> Shared<T> {
    let shared = Rc::new(RefCell::new(component));
    bus.register(shared.clone());
    shared
}

fn skipped(component: &str, missing: &str) {
    tracing::debug!(component, missing, "Elements absent, component not mounted");
}

/// One page with its mounted components
pub struct Page {
    bus: EventBus,
    elements: PageElements,
    clock: Rc<dyn Clock>,
    modals: Option<Shared<ModalManager>>,
    appointment: Option<Shared<AppointmentFlow>>,
    accordion: Option<Shared<Accordion>>,
    slider: Option<Shared<Slider>>,
    tabs: Vec<Shared<TabGroup>>,
    passwords: Vec<Shared<PasswordToggle>>,
    sidebar: Option<Shared<Sidebar>>,
    dropdown: Option<Shared<Dropdown>>,
    mobile_menu: Option<Shared<MobileMenu>>,
    contact: Option<Shared<ContactForm>>,
    feedback: Option<Shared<FeedbackForm>>,
    faq: Option<Shared<FaqSearch>>,
    help: Option<Shared<HelpSearch>>,
    doctors: Option<Shared<DoctorFilter>>,
    availability: Option<Shared<AvailabilityEditor>>,
    appointment_table: Option<Shared<AppointmentTable>>,
    logout: Option<Shared<LogoutConfirm>>,
    add_doctor: Option<Shared<AddDoctorForm>>,
}

impl Page {
    /// Mount using the directory and clock the config selects
    pub fn from_config(elements: PageElements, config: &Config) -> Result<Self, PageError> {
        let provider: Rc<dyn ScheduleProvider> = Rc::new(config.booking.directory()?);
        Ok(Self::mount(elements, config, provider, config.booking.clock()))
    }

    /// Mount every component whose elements exist
    pub fn mount(
        elements: PageElements,
        config: &Config,
        provider: Rc<dyn ScheduleProvider>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let mut bus = EventBus::new(config.events.bus_config());
        let timers = &config.timers;

        let has_contact = elements.has(ids::CONTACT_FORM);

        // Modals first so that open requests from other mounts find them
        let modals = if elements.modals.is_empty() && !has_contact {
            skipped("modals", ".modal");
            None
        } else {
            let mut manager = ModalManager::new();
            for id in &elements.modals {
                let auto_dismiss = match id.as_str() {
                    ids::CONFIRMATION_MODAL => timers.confirmation_auto_dismiss(),
                    ids::CONTACT_SUCCESS_MODAL => Some(timers.auto_dismiss()),
                    _ => None,
                };
                manager.add_modal(id.as_str(), auto_dismiss);
            }
            if has_contact {
                manager.add_modal(ids::CONTACT_SUCCESS_MODAL, Some(timers.auto_dismiss()));
            }
            Some(mount(&mut bus, manager))
        };

        let appointment_ids = [
            ids::APPOINTMENT_FORM,
            ids::SPECIALTY_SELECT,
            ids::DOCTOR_SELECT,
            ids::DATE_INPUT,
            ids::TIME_SELECT,
        ];
        let appointment = if elements.has_all(&appointment_ids) {
            let form = BookingForm::new(provider.clone())
                .weekends_disabled(config.booking.disable_weekends);
            let modal = elements
                .has_modal(ids::CONFIRMATION_MODAL)
                .then(|| ids::CONFIRMATION_MODAL.to_string());
            Some(mount(&mut bus, AppointmentFlow::new(form, clock.clone(), modal)))
        } else {
            skipped("appointment", ids::APPOINTMENT_FORM);
            None
        };

        let accordion = (elements.accordion_items > 0).then(|| {
            mount(
                &mut bus,
                Accordion::new(elements.accordion_items, config.widgets.accordion_mode()),
            )
        });

        let slider = if elements.slider_controls {
            match Slider::new(elements.slides, timers.slider_interval()) {
                Ok(slider) => Some(mount(&mut bus, slider)),
                Err(e) => {
                    tracing::debug!(error = %e, "Slider not mounted");
                    None
                }
            }
        } else {
            skipped("slider", ".testimonials-slider");
            None
        };

        let mut tabs = Vec::new();
        for spec in &elements.tab_groups {
            match TabGroup::new(spec.group.as_str(), spec.tabs.iter().map(String::as_str)) {
                Ok(group) => tabs.push(mount(&mut bus, group)),
                Err(e) => tracing::debug!(error = %e, "Tab group not mounted"),
            }
        }

        let passwords = elements
            .password_inputs
            .iter()
            .map(|input| mount(&mut bus, PasswordToggle::new(input.as_str())))
            .collect();

        let sidebar = elements.sidebar.then(|| {
            mount(
                &mut bus,
                Sidebar::new(
                    config.widgets.initial_viewport_px,
                    config.widgets.mobile_breakpoint_px,
                ),
            )
        });
        let dropdown = elements.dropdown.then(|| mount(&mut bus, Dropdown::new()));
        let mobile_menu = elements.mobile_menu.then(|| mount(&mut bus, MobileMenu::new()));

        let contact = has_contact.then(|| {
            mount(
                &mut bus,
                ContactForm::new(Some(ids::CONTACT_SUCCESS_MODAL.to_string())),
            )
        });

        let feedback = if elements.has(ids::FEEDBACK_FORM) {
            let modal = elements
                .has_modal(ids::FEEDBACK_SUCCESS_MODAL)
                .then(|| ids::FEEDBACK_SUCCESS_MODAL.to_string());
            Some(mount(
                &mut bus,
                FeedbackForm::new(modal, timers.feedback_submit_delay()),
            ))
        } else {
            skipped("feedback", ids::FEEDBACK_FORM);
            None
        };

        let faq = (!elements.faq.is_empty())
            .then(|| mount(&mut bus, FaqSearch::new(elements.faq.clone())));
        let help = (!elements.help.is_empty())
            .then(|| mount(&mut bus, HelpSearch::new(elements.help.clone())));

        let doctors = if elements.has(ids::DOCTOR_SEARCH) || elements.has(ids::SPECIALTY_FILTER) {
            Some(mount(
                &mut bus,
                DoctorFilter::new(elements.doctor_cards.clone()),
            ))
        } else {
            None
        };

        let availability = (!elements.availability.is_empty())
            .then(|| mount(&mut bus, AvailabilityEditor::new(elements.availability.clone())));

        let appointment_table = (!elements.appointment_rows.is_empty()).then(|| {
            let modal = |id: &str| elements.has_modal(id).then(|| id.to_string());
            let modals = TableModals {
                view: modal(ids::VIEW_APPOINTMENT_MODAL),
                edit: modal(ids::EDIT_APPOINTMENT_MODAL),
                delete: modal(ids::DELETE_APPOINTMENT_MODAL),
            };
            mount(
                &mut bus,
                AppointmentTable::new(elements.appointment_rows.clone(), modals),
            )
        });

        let logout = if elements.has(ids::LOGOUT_BUTTON) && elements.has_modal(ids::LOGOUT_MODAL) {
            Some(mount(&mut bus, LogoutConfirm::new(ids::LOGOUT_MODAL)))
        } else {
            skipped("logout", ids::LOGOUT_MODAL);
            None
        };

        let add_doctor = elements
            .has(ids::ADD_DOCTOR_FORM)
            .then(|| mount(&mut bus, AddDoctorForm::new()));

        let page = Self {
            bus,
            elements,
            clock,
            modals,
            appointment,
            accordion,
            slider,
            tabs,
            passwords,
            sidebar,
            dropdown,
            mobile_menu,
            contact,
            feedback,
            faq,
            help,
            doctors,
            availability,
            appointment_table,
            logout,
            add_doctor,
        };
        tracing::info!(components = ?page.mounted(), "Page mounted");
        page
    }

    /// Process one host event with all its follow-ups
    pub fn dispatch(&mut self, event: UiEvent) -> DispatchReport {
        self.bus.publish(event)
    }

    /// Move page time forward, firing due timers
    pub fn advance(&mut self, elapsed: Duration) -> DispatchReport {
        self.bus.advance(elapsed)
    }

    pub fn advance_to(&mut self, target: Duration) -> DispatchReport {
        self.bus.advance_to(target)
    }

    pub fn now(&self) -> Duration {
        self.bus.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.bus.next_deadline()
    }

    /// Names of mounted components
    pub fn mounted(&self) -> Vec<&'static str> {
        self.bus.component_names()
    }

    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Feed the page from a channel until it closes or `shutdown` resolves
    pub async fn run<F>(
        &mut self,
        events: mpsc::UnboundedReceiver<UiEvent>,
        shutdown: F,
    ) -> DriverStats
    where
        F: std::future::Future<Output = ()>,
    {
        events::run(&mut self.bus, events, shutdown).await
    }

    /// Render the dashboard charts whose canvases exist
    pub fn init_charts(&self, renderer: Option<&mut dyn ChartRenderer>) -> ChartReport {
        init_charts(renderer, &default_charts(), |id| self.elements.has(id))
    }

    /// Picker setup for the appointment date input
    pub fn date_picker_config(&self) -> Option<DatePickerConfig> {
        let appointment = self.appointment.as_ref()?.borrow();
        Some(
            appointment
                .form()
                .date_policy(self.clock.today())
                .picker_config(),
        )
    }

    pub fn appointment(&self) -> Option<Ref<'_, AppointmentFlow>> {
        self.appointment.as_ref().map(|c| c.borrow())
    }

    pub fn modals(&self) -> Option<Ref<'_, ModalManager>> {
        self.modals.as_ref().map(|c| c.borrow())
    }

    pub fn accordion(&self) -> Option<Ref<'_, Accordion>> {
        self.accordion.as_ref().map(|c| c.borrow())
    }

    pub fn slider(&self) -> Option<Ref<'_, Slider>> {
        self.slider.as_ref().map(|c| c.borrow())
    }

    pub fn contact(&self) -> Option<Ref<'_, ContactForm>> {
        self.contact.as_ref().map(|c| c.borrow())
    }

    pub fn feedback(&self) -> Option<Ref<'_, FeedbackForm>> {
        self.feedback.as_ref().map(|c| c.borrow())
    }

    pub fn faq(&self) -> Option<Ref<'_, FaqSearch>> {
        self.faq.as_ref().map(|c| c.borrow())
    }

    pub fn help(&self) -> Option<Ref<'_, HelpSearch>> {
        self.help.as_ref().map(|c| c.borrow())
    }

    pub fn availability(&self) -> Option<Ref<'_, AvailabilityEditor>> {
        self.availability.as_ref().map(|c| c.borrow())
    }

    pub fn appointment_table(&self) -> Option<Ref<'_, AppointmentTable>> {
        self.appointment_table.as_ref().map(|c| c.borrow())
    }

    pub fn logout(&self) -> Option<Ref<'_, LogoutConfirm>> {
        self.logout.as_ref().map(|c| c.borrow())
    }

    pub fn add_doctor(&self) -> Option<Ref<'_, AddDoctorForm>> {
        self.add_doctor.as_ref().map(|c| c.borrow())
    }

    pub fn render(&self) -> PageView {
        PageView {
            appointment: self.appointment.as_ref().map(|c| c.borrow().view()),
            date_picker: self.date_picker_config(),
            modals: self
                .modals
                .as_ref()
                .map(|c| c.borrow().view())
                .unwrap_or_default(),
            accordion: self.accordion.as_ref().map(|c| c.borrow().view()),
            slider: self.slider.as_ref().map(|c| c.borrow().view()),
            tabs: self.tabs.iter().map(|c| c.borrow().view()).collect(),
            passwords: self.passwords.iter().map(|c| c.borrow().view()).collect(),
            sidebar: self.sidebar.as_ref().map(|c| c.borrow().view()),
            dropdown: self.dropdown.as_ref().map(|c| c.borrow().view()),
            mobile_menu: self.mobile_menu.as_ref().map(|c| c.borrow().view()),
            contact: self.contact.as_ref().map(|c| c.borrow().view()),
            feedback: self.feedback.as_ref().map(|c| c.borrow().view()),
            faq: self.faq.as_ref().map(|c| c.borrow().view()),
            help: self.help.as_ref().map(|c| c.borrow().view()),
            doctors: self.doctors.as_ref().map(|c| c.borrow().view()),
            availability: self.availability.as_ref().map(|c| c.borrow().view()),
            appointments: self.appointment_table.as_ref().map(|c| c.borrow().view()),
            logout: self.logout.as_ref().map(|c| c.borrow().view()),
            add_doctor: self.add_doctor.as_ref().map(|c| c.borrow().view()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::FixedClock;
    use crate::directory::StaticDirectory;
    use crate::events::{CloseKind, FormId, Region, TimerId};
    use crate::search::{FaqGroup, FaqItem};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn page_with(elements: PageElements, config: &Config) -> Page {
        Page::mount(
            elements,
            config,
            Rc::new(StaticDirectory::builtin()),
            Rc::new(FixedClock(today())),
        )
    }

    fn book(page: &mut Page) {
        for event in [
            UiEvent::SpecialtyChanged { value: "cardiology".into() },
            UiEvent::DoctorChanged { value: "c1".into() },
            UiEvent::DatePicked { value: "2025-03-10".into() },
            UiEvent::TimeChanged { value: "09:00 AM".into() },
            UiEvent::FormSubmitted { form: FormId::Appointment },
        ] {
            page.dispatch(event);
        }
    }

    fn modal_visible(page: &Page, id: &str) -> bool {
        page.modals().map(|m| m.is_visible(id)).unwrap_or(false)
    }

    #[test]
    fn test_empty_page_mounts_nothing() {
        let page = page_with(PageElements::new(), &Config::default());
        assert!(page.mounted().is_empty());
        let view = page.render();
        assert!(view.appointment.is_none());
        assert!(view.modals.is_empty());
    }

    #[test]
    fn test_booking_end_to_end() {
        let mut page = page_with(PageElements::appointment_page(), &Config::default());
        book(&mut page);

        assert!(modal_visible(&page, ids::CONFIRMATION_MODAL));
        let view = page.render();
        assert_eq!(
            view.appointment.unwrap().message.as_deref(),
            Some("Your appointment with Dr. John Smith on Monday, March 10, 2025 at 09:00 AM is confirmed.")
        );
        assert_eq!(view.date_picker.unwrap().min_date, "2025-03-03");
    }

    #[test]
    fn test_close_button_resets_booking() {
        let mut page = page_with(PageElements::appointment_page(), &Config::default());
        book(&mut page);

        page.dispatch(UiEvent::CloseControlClicked {
            modal: Some(ids::CONFIRMATION_MODAL.into()),
            kind: CloseKind::Button,
        });
        assert!(!modal_visible(&page, ids::CONFIRMATION_MODAL));
        assert!(page.appointment().unwrap().form().selection().is_empty());
    }

    #[test]
    fn test_glyph_keeps_booking() {
        let mut page = page_with(PageElements::appointment_page(), &Config::default());
        book(&mut page);

        page.dispatch(UiEvent::CloseControlClicked {
            modal: Some(ids::CONFIRMATION_MODAL.into()),
            kind: CloseKind::Glyph,
        });
        assert!(!modal_visible(&page, ids::CONFIRMATION_MODAL));
        assert!(page.appointment().unwrap().form().selection().is_complete());
    }

    #[test]
    fn test_missing_confirmation_modal() {
        let elements = PageElements::new().with_ids([
            ids::APPOINTMENT_FORM,
            ids::SPECIALTY_SELECT,
            ids::DOCTOR_SELECT,
            ids::DATE_INPUT,
            ids::TIME_SELECT,
        ]);
        let mut page = page_with(elements, &Config::default());
        assert_eq!(page.mounted(), vec!["appointment"]);

        book(&mut page);
        assert!(page.appointment().unwrap().last_confirmation().is_some());
    }

    #[test]
    fn test_confirmation_auto_dismiss() {
        let mut config = Config::default();
        config.timers.confirmation_auto_dismiss_ms = Some(3000);
        let mut page = page_with(PageElements::appointment_page(), &config);
        book(&mut page);

        page.advance(Duration::from_millis(2999));
        assert!(modal_visible(&page, ids::CONFIRMATION_MODAL));
        page.advance(Duration::from_millis(1));
        assert!(!modal_visible(&page, ids::CONFIRMATION_MODAL));
        // Auto-dismiss hides only
        assert!(page.appointment().unwrap().form().selection().is_complete());
    }

    #[test]
    fn test_escape_hides_only_open_modals() {
        let elements = PageElements::new().with_modal("a").with_modal("b");
        let mut page = page_with(elements, &Config::default());
        page.dispatch(UiEvent::ModalTriggered { modal: "a".into() });

        page.dispatch(UiEvent::escape());
        assert!(!modal_visible(&page, "a"));
        assert!(!modal_visible(&page, "b"));
    }

    #[test]
    fn test_contact_success_auto_dismiss() {
        let elements = PageElements::new().with_ids([ids::CONTACT_FORM]);
        let mut page = page_with(elements, &Config::default());

        for (field, value) in [
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("subject", "Parking"),
            ("message", "Is there visitor parking?"),
        ] {
            page.dispatch(UiEvent::FieldInput {
                form: FormId::Contact,
                field: field.into(),
                value: value.into(),
            });
        }
        page.dispatch(UiEvent::FormSubmitted { form: FormId::Contact });
        assert!(modal_visible(&page, ids::CONTACT_SUCCESS_MODAL));
        assert_eq!(page.contact().unwrap().sent(), 1);

        page.advance(Duration::from_millis(5000));
        assert!(!modal_visible(&page, ids::CONTACT_SUCCESS_MODAL));
        assert!(page.next_deadline().is_none());
    }

    #[test]
    fn test_feedback_flow() {
        let elements = PageElements::new()
            .with_ids([ids::FEEDBACK_FORM, ids::RATING_TEXT])
            .with_modal(ids::FEEDBACK_SUCCESS_MODAL);
        let mut page = page_with(elements, &Config::default());

        for (field, value) in [
            ("visitType", "outpatient"),
            ("visitDate", "2025-02-20"),
            ("department", "neurology"),
            ("privacyConsent", "on"),
        ] {
            page.dispatch(UiEvent::FieldInput {
                form: FormId::Feedback,
                field: field.into(),
                value: value.into(),
            });
        }
        page.dispatch(UiEvent::RatingSelected { rating: 5 });
        page.dispatch(UiEvent::FormSubmitted { form: FormId::Feedback });

        assert!(!modal_visible(&page, ids::FEEDBACK_SUCCESS_MODAL));
        page.advance(Duration::from_millis(1000));
        assert!(modal_visible(&page, ids::FEEDBACK_SUCCESS_MODAL));

        page.dispatch(UiEvent::CloseControlClicked {
            modal: Some(ids::FEEDBACK_SUCCESS_MODAL.into()),
            kind: CloseKind::Button,
        });
        let feedback = page.feedback().unwrap();
        assert_eq!(feedback.rating(), None);
        assert!(feedback.fields().values.is_empty());
    }

    #[test]
    fn test_slider_auto_advance_and_pause() {
        let mut config = Config::default();
        config.timers.slider_interval_ms = 100;
        let mut page = page_with(PageElements::new().with_slider(3), &config);

        page.advance(Duration::from_millis(250));
        assert_eq!(page.slider().unwrap().current(), 2);

        page.dispatch(UiEvent::PointerEntered { region: Region::Slider });
        page.advance(Duration::from_millis(1000));
        assert_eq!(page.slider().unwrap().current(), 2);

        page.dispatch(UiEvent::PointerLeft { region: Region::Slider });
        page.advance(Duration::from_millis(99));
        assert_eq!(page.slider().unwrap().current(), 2);
        page.advance(Duration::from_millis(1));
        assert_eq!(page.slider().unwrap().current(), 0);
    }

    #[test]
    fn test_zero_slides_not_mounted() {
        let mut elements = PageElements::new().with_slider(0);
        elements.slides = 0;
        let page = page_with(elements, &Config::default());
        assert!(page.slider().is_none());
    }

    #[test]
    fn test_accordion_and_faq() {
        let elements = PageElements::new().with_accordion(2).with_faq(vec![FaqGroup {
            category: "general".into(),
            items: vec![
                FaqItem::new("Where do I park?", "Level B2."),
                FaqItem::new("Visiting hours?", "9 to 5."),
            ],
        }]);
        let mut page = page_with(elements, &Config::default());

        page.dispatch(UiEvent::ContentMeasured { item: 1, height: 40 });
        page.dispatch(UiEvent::AccordionHeaderActivated { item: 1 });
        page.dispatch(UiEvent::SearchInput {
            scope: crate::events::SearchScope::Faq,
            term: "park".into(),
        });

        let view = page.render();
        assert_eq!(view.accordion.unwrap()[1].height, 40);
        assert_eq!(view.faq.unwrap().groups[0].items, vec![true, false]);
    }

    #[test]
    fn test_dashboard_chrome() {
        let elements = PageElements::new()
            .with_dashboard_chrome()
            .with_password_input("patient-password")
            .with_tab_group("login", ["patient-login", "doctor-login"]);
        let mut page = page_with(elements, &Config::default());

        page.dispatch(UiEvent::Click { region: Region::DropdownToggle });
        page.dispatch(UiEvent::Click { region: Region::SidebarToggle });
        page.dispatch(UiEvent::TabSelected {
            group: "login".into(),
            tab: "doctor-login".into(),
        });
        page.dispatch(UiEvent::Click {
            region: Region::PasswordToggle {
                input: "patient-password".into(),
            },
        });

        let view = page.render();
        // The sidebar toggle click is outside the dropdown
        assert!(!view.dropdown.unwrap().open);
        assert!(view.sidebar.unwrap().collapsed);
        assert!(view.tabs[0].tabs[1].active);
        assert_eq!(view.passwords[0].input_type, "text");
    }

    #[test]
    fn test_help_highlight_expires() {
        use crate::search::{HelpArticle, HelpSection};
        let elements = PageElements::new().with_help(vec![HelpSection {
            id: "billing".into(),
            articles: vec![HelpArticle::new("Paying a bill", "Cards accepted.")],
        }]);
        let mut page = page_with(elements, &Config::default());

        page.dispatch(UiEvent::TopicLinkClicked { section: "billing".into() });
        assert!(page.help().unwrap().is_highlighted("billing"));
        assert_eq!(
            page.bus().timers().deadline(&TimerId::HighlightClear("billing".into())),
            Some(Duration::from_millis(2000))
        );

        page.advance(Duration::from_millis(2000));
        assert!(!page.help().unwrap().is_highlighted("billing"));
    }

    #[test]
    fn test_modal_closed_reaches_all_listeners() {
        let elements = PageElements::appointment_page().with_modal("logout-modal");
        let mut page = page_with(elements, &Config::default());
        book(&mut page);
        page.dispatch(UiEvent::ModalTriggered { modal: "logout-modal".into() });

        let report = page.dispatch(UiEvent::escape());
        // Escape plus one ModalClosed per visible modal
        assert_eq!(report.processed, 3);
        assert!(page.modals().unwrap().visible_ids().is_empty());
    }

    #[test]
    fn test_charts_follow_canvases() {
        struct Count(usize);
        impl ChartRenderer for Count {
            fn render(&mut self, _: &crate::dashboard::ChartSpec) -> Result<(), crate::dashboard::ChartError> {
                self.0 += 1;
                Ok(())
            }
        }

        let elements = PageElements::new().with_ids([crate::dashboard::REVENUE_CANVAS]);
        let page = page_with(elements, &Config::default());
        let mut renderer = Count(0);
        let report = page.init_charts(Some(&mut renderer));
        assert_eq!(renderer.0, 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(page.init_charts(None).renderer_missing);
    }

    fn admin_page() -> PageElements {
        use crate::dashboard::AppointmentRow;
        PageElements::new()
            .with_ids([ids::LOGOUT_BUTTON])
            .with_modal(ids::DELETE_APPOINTMENT_MODAL)
            .with_modal(ids::LOGOUT_MODAL)
            .with_appointment_rows(vec![
                AppointmentRow::new("1", "John Doe", "3/9/2025", "09:00 AM", "Confirmed"),
                AppointmentRow::new("2", "Jane Roe", "3/10/2025", "10:00 AM", "Pending"),
            ])
    }

    fn delete_row(page: &mut Page, row: &str) {
        page.dispatch(UiEvent::AppointmentAction {
            row: row.into(),
            action: crate::events::RowAction::Delete,
        });
    }

    fn row_ids(page: &Page) -> Vec<String> {
        let table = page.appointment_table().unwrap();
        table.rows().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_delete_confirmation_through_bus() {
        let mut page = page_with(admin_page(), &Config::default());

        delete_row(&mut page, "1");
        assert!(modal_visible(&page, ids::DELETE_APPOINTMENT_MODAL));
        assert_eq!(row_ids(&page), vec!["1", "2"]);

        page.dispatch(UiEvent::DeleteConfirmed);
        assert!(!modal_visible(&page, ids::DELETE_APPOINTMENT_MODAL));
        assert_eq!(row_ids(&page), vec!["2"]);
    }

    #[test]
    fn test_delete_cancel_by_backdrop_keeps_rows() {
        let mut page = page_with(admin_page(), &Config::default());

        delete_row(&mut page, "2");
        page.dispatch(UiEvent::ModalClicked {
            modal: ids::DELETE_APPOINTMENT_MODAL.into(),
            on_backdrop: true,
        });
        assert!(!modal_visible(&page, ids::DELETE_APPOINTMENT_MODAL));
        assert!(page.appointment_table().unwrap().pending_delete().is_none());

        page.dispatch(UiEvent::DeleteConfirmed);
        assert_eq!(row_ids(&page), vec!["1", "2"]);
    }

    #[test]
    fn test_logout_cancel_and_confirm() {
        let mut page = page_with(admin_page(), &Config::default());

        page.dispatch(UiEvent::LogoutRequested);
        assert!(modal_visible(&page, ids::LOGOUT_MODAL));
        page.dispatch(UiEvent::LogoutCancelled);
        assert!(!modal_visible(&page, ids::LOGOUT_MODAL));

        page.dispatch(UiEvent::LogoutRequested);
        page.dispatch(UiEvent::ModalClicked {
            modal: ids::LOGOUT_MODAL.into(),
            on_backdrop: true,
        });
        assert!(!modal_visible(&page, ids::LOGOUT_MODAL));
        assert_eq!(page.render().logout.unwrap().redirect, None);

        page.dispatch(UiEvent::LogoutConfirmed);
        assert_eq!(
            page.render().logout.unwrap().redirect,
            Some(crate::dashboard::LOGIN_PAGE)
        );
    }

    #[test]
    fn test_admin_widgets_mount_on_their_elements() {
        use crate::dashboard::AvailabilityDay;
        let elements = admin_page()
            .with_ids([ids::ADD_DOCTOR_FORM])
            .with_availability(vec![AvailabilityDay::new("Monday", false, ["09:00 AM"])]);
        let mut page = page_with(elements, &Config::default());

        page.dispatch(UiEvent::AvailabilityToggled {
            day: "Monday".into(),
            available: true,
        });
        page.dispatch(UiEvent::FormSubmitted { form: FormId::AddDoctor });

        let view = page.render();
        assert_eq!(view.availability.unwrap()[0].slots_display, "flex");
        assert_eq!(
            view.add_doctor.unwrap().alert,
            Some(crate::dashboard::MISSING_FIELDS_MESSAGE)
        );
        assert!(page.logout().is_some());
        assert!(page.add_doctor().is_some());

        let bare = page_with(PageElements::new().with_modal(ids::LOGOUT_MODAL), &Config::default());
        assert!(bare.logout().is_none());
        assert!(bare.appointment_table().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_drives_timers() {
        let mut config = Config::default();
        config.timers.slider_interval_ms = 1000;
        let mut page = page_with(PageElements::new().with_slider(4), &config);

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(UiEvent::SliderNext).unwrap();
        let shutdown = tokio::time::sleep(Duration::from_millis(2500));

        let stats = page.run(rx, shutdown).await;
        assert_eq!(stats.events, 1);
        // One manual step plus two timer steps
        assert_eq!(page.slider().unwrap().current(), 3);
        drop(tx);
    }
}
