//! Two-state toggles: password visibility, sidebar, user dropdown, mobile menu

use serde::Serialize;

use crate::events::{Component, Effect, Region, Topic, UiEvent};

/// Default width at or below which the sidebar behaves as a mobile drawer
pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 768;

/// Show/hide button next to a password input
#[derive(Debug, Clone)]
pub struct PasswordToggle {
    input: String,
    revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordToggleView {
    pub input: String,
    pub input_type: &'static str,
    pub icon: &'static str,
}

impl PasswordToggle {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            revealed: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn view(&self) -> PasswordToggleView {
        let (input_type, icon) = if self.revealed {
            ("text", "fa-eye-slash")
        } else {
            ("password", "fa-eye")
        };
        PasswordToggleView {
            input: self.input.clone(),
            input_type,
            icon,
        }
    }
}

impl Component for PasswordToggle {
    fn name(&self) -> &'static str {
        "password-toggle"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Pointer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        if let UiEvent::Click {
            region: Region::PasswordToggle { input },
        } = event
        {
            if *input == self.input {
                self.toggle();
            }
        }
        Vec::new()
    }
}

/// Dashboard sidebar: desktop collapse plus mobile drawer
#[derive(Debug, Clone)]
pub struct Sidebar {
    collapsed: bool,
    mobile_shown: bool,
    viewport_width: u32,
    breakpoint: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub collapsed: bool,
    pub mobile_show: bool,
}

impl Sidebar {
    pub fn new(viewport_width: u32, breakpoint: u32) -> Self {
        Self {
            collapsed: false,
            mobile_shown: false,
            viewport_width,
            breakpoint,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width <= self.breakpoint
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile_shown = !self.mobile_shown;
    }

    pub fn resize(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// A click anywhere else hides the mobile drawer on narrow viewports
    pub fn click_outside(&mut self) {
        if self.is_mobile() {
            self.mobile_shown = false;
        }
    }

    pub fn view(&self) -> SidebarView {
        SidebarView {
            collapsed: self.collapsed,
            mobile_show: self.mobile_shown,
        }
    }
}

impl Component for Sidebar {
    fn name(&self) -> &'static str {
        "sidebar"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Pointer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Click { region } => match region {
                Region::SidebarToggle => self.toggle_collapsed(),
                Region::MobileSidebarToggle => self.toggle_mobile(),
                Region::Sidebar => {}
                _ => self.click_outside(),
            },
            UiEvent::Resized { width } => self.resize(*width),
            _ => {}
        }
        Vec::new()
    }
}

/// User dropdown in the dashboard header
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropdownView {
    pub open: bool,
    pub chevron: &'static str,
}

impl Dropdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn view(&self) -> DropdownView {
        DropdownView {
            open: self.open,
            chevron: if self.open {
                "fa-chevron-up"
            } else {
                "fa-chevron-down"
            },
        }
    }
}

impl Component for Dropdown {
    fn name(&self) -> &'static str {
        "dropdown"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Pointer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        if let UiEvent::Click { region } = event {
            match region {
                Region::DropdownToggle => self.toggle(),
                Region::DropdownMenu => {}
                _ => self.close(),
            }
        }
        Vec::new()
    }
}

/// Hamburger menu: shows nav links and login buttons together
#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MobileMenuView {
    pub nav_links_show: bool,
    pub login_buttons_show: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn view(&self) -> MobileMenuView {
        MobileMenuView {
            nav_links_show: self.open,
            login_buttons_show: self.open,
        }
    }
}

impl Component for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile-menu"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Pointer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        if let UiEvent::Click {
            region: Region::MobileMenuButton,
        } = event
        {
            self.toggle();
        }
        Vec::new()
    }
}
