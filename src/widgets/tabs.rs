//! Exclusive tab groups (login tabs, FAQ category buttons)

use serde::Serialize;

use super::error::{WidgetError, WidgetResult};
use crate::events::{Component, Effect, Topic, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: String,
    /// Button carries `active` and its panel is shown
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabGroupView {
    pub group: String,
    pub tabs: Vec<TabView>,
}

/// A group of tabs of which exactly one is active
#[derive(Debug, Clone)]
pub struct TabGroup {
    group: String,
    tabs: Vec<String>,
    active: usize,
}

impl TabGroup {
    /// First tab starts active
    pub fn new<I, S>(group: impl Into<String>, tabs: I) -> WidgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group = group.into();
        let tabs: Vec<String> = tabs.into_iter().map(Into::into).collect();
        if tabs.is_empty() {
            return Err(WidgetError::EmptyTabGroup(group));
        }
        Ok(Self {
            group,
            tabs,
            active: 0,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn active(&self) -> &str {
        &self.tabs[self.active]
    }

    pub fn select(&mut self, tab: &str) -> WidgetResult<()> {
        let index = self
            .tabs
            .iter()
            .position(|t| t == tab)
            .ok_or_else(|| WidgetError::UnknownTab {
                group: self.group.clone(),
                tab: tab.to_string(),
            })?;
        self.active = index;
        Ok(())
    }

    pub fn view(&self) -> TabGroupView {
        TabGroupView {
            group: self.group.clone(),
            tabs: self
                .tabs
                .iter()
                .enumerate()
                .map(|(i, id)| TabView {
                    id: id.clone(),
                    active: i == self.active,
                })
                .collect(),
        }
    }
}

impl Component for TabGroup {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Tabs]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        if let UiEvent::TabSelected { group, tab } = event {
            if *group == self.group {
                if let Err(e) = self.select(tab) {
                    tracing::debug!(error = %e, "Tab selection ignored");
                }
            }
        }
        Vec::new()
    }
}
