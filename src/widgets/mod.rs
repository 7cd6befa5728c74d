//! UI Widgets
//!
//! Self-contained state machines for the page chrome. Each is a plain struct
//! with pure transitions and a `view()`, and implements
//! [`Component`](crate::events::Component) to be driven by the bus.

pub mod accordion;
pub mod error;
pub mod modal;
pub mod slider;
pub mod tabs;
pub mod toggle;

pub use accordion::{Accordion, AccordionItem, AccordionItemView, AccordionMode, PanelState};
pub use error::{WidgetError, WidgetResult};
pub use modal::{ModalManager, ModalView};
pub use slider::{Slider, SliderView, DEFAULT_SLIDER_INTERVAL};
pub use tabs::{TabGroup, TabGroupView, TabView};
pub use toggle::{
    Dropdown, DropdownView, MobileMenu, MobileMenuView, PasswordToggle, PasswordToggleView,
    Sidebar, SidebarView, DEFAULT_MOBILE_BREAKPOINT_PX,
};
