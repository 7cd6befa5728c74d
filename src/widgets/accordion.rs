//! Accordion / FAQ toggle controller

use serde::Serialize;

use super::error::{WidgetError, WidgetResult};
use crate::events::{Component, Effect, Topic, UiEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }
}

/// Whether opening one item closes the others
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccordionMode {
    #[default]
    Independent,
    Exclusive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionItem {
    pub state: PanelState,
    /// Natural panel height in px, as last measured by the host
    pub natural_height: u32,
}

/// Rendered item: header `active` class, panel height in px, header icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccordionItemView {
    pub active: bool,
    pub height: u32,
    pub chevron: &'static str,
}

#[derive(Debug, Clone)]
pub struct Accordion {
    items: Vec<AccordionItem>,
    mode: AccordionMode,
}

impl Accordion {
    /// `count` collapsed items
    pub fn new(count: usize, mode: AccordionMode) -> Self {
        Self {
            items: vec![AccordionItem::default(); count],
            mode,
        }
    }

    /// Items with known natural heights, all collapsed
    pub fn with_heights(heights: impl IntoIterator<Item = u32>, mode: AccordionMode) -> Self {
        let items = heights
            .into_iter()
            .map(|natural_height| AccordionItem {
                state: PanelState::Collapsed,
                natural_height,
            })
            .collect();
        Self { items, mode }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> AccordionMode {
        self.mode
    }

    pub fn state(&self, index: usize) -> Option<PanelState> {
        self.items.get(index).map(|item| item.state)
    }

    /// Indices of expanded items
    pub fn expanded(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.state == PanelState::Expanded)
            .map(|(i, _)| i)
            .collect()
    }

    /// Flip one item; returns its new state
    pub fn toggle(&mut self, index: usize) -> WidgetResult<PanelState> {
        let count = self.items.len();
        let next = self
            .items
            .get(index)
            .ok_or(WidgetError::UnknownItem { index, count })?
            .state
            .toggled();

        if self.mode == AccordionMode::Exclusive && next == PanelState::Expanded {
            for item in &mut self.items {
                item.state = PanelState::Collapsed;
            }
        }
        self.items[index].state = next;
        Ok(next)
    }

    /// Record a new natural height for an item
    pub fn measure(&mut self, index: usize, height: u32) -> WidgetResult<()> {
        let count = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(WidgetError::UnknownItem { index, count })?;
        item.natural_height = height;
        Ok(())
    }

    pub fn view(&self) -> Vec<AccordionItemView> {
        self.items
            .iter()
            .map(|item| match item.state {
                PanelState::Expanded => AccordionItemView {
                    active: true,
                    height: item.natural_height,
                    chevron: "fa-chevron-up",
                },
                PanelState::Collapsed => AccordionItemView {
                    active: false,
                    height: 0,
                    chevron: "fa-chevron-down",
                },
            })
            .collect()
    }
}

impl Component for Accordion {
    fn name(&self) -> &'static str {
        "accordion"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Accordion]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        let result = match event {
            UiEvent::AccordionHeaderActivated { item } => self.toggle(*item).map(|state| {
                tracing::debug!(item, ?state, "Accordion item toggled");
            }),
            UiEvent::ContentMeasured { item, height } => self.measure(*item, *height),
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Accordion event ignored");
        }
        Vec::new()
    }
}
