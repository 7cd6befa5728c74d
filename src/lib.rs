//! # medibook
//!
//! Headless state engine for a hospital front end: appointment booking,
//! contact and feedback forms, modals, page widgets, client-side search and
//! dashboard charts. The host page forwards DOM events as [`UiEvent`]s and
//! renders the serializable views the components hand back.
//!
//! ## Modules
//!
//! - [`directory`]: specialties, doctors and bookable times
//! - [`booking`]: the cascading appointment form and its confirmation
//! - [`events`]: events, effects, the component bus and timers
//! - [`widgets`]: modals, accordion, slider, tabs and toggles
//! - [`forms`]: contact and feedback validation
//! - [`search`]: FAQ, help-center and doctor filtering
//! - [`dashboard`]: chart specifications, the renderer seam and the admin widgets
//! - [`page`]: mounts components for the elements a page declares
//!
//! ## Quick Start
//!
//! ```rust
//! use medibook::config::Config;
//! use medibook::events::{Region, UiEvent};
//! use medibook::page::{Page, PageElements};
//! use std::time::Duration;
//!
//! let elements = PageElements::new().with_slider(3).with_mobile_menu();
//! let mut page = Page::from_config(elements, &Config::default()).unwrap();
//!
//! page.dispatch(UiEvent::Click { region: Region::MobileMenuButton });
//! page.advance(Duration::from_secs(5));
//!
//! let view = page.render();
//! assert!(view.mobile_menu.unwrap().nav_links_show);
//! assert_eq!(view.slider.unwrap().current, 1);
//! ```

pub mod booking;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod events;
pub mod forms;
pub mod page;
pub mod search;
pub mod telemetry;
pub mod widgets;

pub use booking::{AppointmentFlow, BookingError, BookingForm};
pub use config::Config;
pub use directory::{ScheduleProvider, StaticDirectory};
pub use events::{Component, Effect, EventBus, UiEvent};
pub use page::{Page, PageElements, PageView};
