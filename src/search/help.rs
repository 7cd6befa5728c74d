//! Help center search and topic navigation
//!
//! Jumping to a topic clears any search and highlights the target section
//! for [`HIGHLIGHT_DURATION`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

use super::normalize;
use crate::events::{Component, Effect, Key, SearchScope, TimerId, Topic, UiEvent};

pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

/// Topics offered next to the no-results message: (section id, label)
pub const POPULAR_TOPICS: [(&str, &str); 4] = [
    ("appointments", "Appointments"),
    ("insurance", "Insurance"),
    ("billing", "Billing"),
    ("medical-records", "Medical Records"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpArticle {
    pub title: String,
    pub body: String,
}

impl HelpArticle {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpSection {
    pub id: String,
    pub articles: Vec<HelpArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpSectionView {
    pub id: String,
    pub visible: bool,
    pub highlighted: bool,
    pub articles: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpView {
    pub term: String,
    pub sections: Vec<HelpSectionView>,
    pub no_results: Option<String>,
}

pub fn no_results_message(term: &str) -> String {
    format!("No results found for \"{}\"", term)
}

#[derive(Debug, Clone)]
pub struct HelpSearch {
    sections: Vec<HelpSection>,
    term: String,
    article_visible: Vec<Vec<bool>>,
    highlighted: BTreeSet<String>,
}

impl HelpSearch {
    pub fn new(sections: Vec<HelpSection>) -> Self {
        let article_visible = sections.iter().map(|s| vec![true; s.articles.len()]).collect();
        Self {
            sections,
            term: String::new(),
            article_visible,
            highlighted: BTreeSet::new(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_highlighted(&self, section: &str) -> bool {
        self.highlighted.contains(section)
    }

    fn any_visible(&self) -> bool {
        self.article_visible.iter().flatten().any(|v| *v)
    }

    pub fn search(&mut self, term: &str) {
        let needle = normalize(term);
        self.term = needle.clone();

        for (section, visible) in self.sections.iter().zip(self.article_visible.iter_mut()) {
            for (article, shown) in section.articles.iter().zip(visible.iter_mut()) {
                *shown = needle.is_empty()
                    || article.title.to_lowercase().contains(&needle)
                    || article.body.to_lowercase().contains(&needle);
            }
        }
    }

    pub fn clear(&mut self) {
        self.search("");
    }

    /// Clear the search and highlight a section; false if no such section
    pub fn jump_to(&mut self, section: &str) -> bool {
        if !self.sections.iter().any(|s| s.id == section) {
            tracing::debug!(section, "Unknown help section");
            return false;
        }
        self.clear();
        self.highlighted.insert(section.to_string());
        true
    }

    pub fn clear_highlight(&mut self, section: &str) {
        self.highlighted.remove(section);
    }

    pub fn view(&self) -> HelpView {
        let searching = !self.term.is_empty();
        let no_results = (searching && !self.any_visible()).then(|| no_results_message(&self.term));

        HelpView {
            term: self.term.clone(),
            sections: self
                .sections
                .iter()
                .zip(&self.article_visible)
                .map(|(section, articles)| HelpSectionView {
                    id: section.id.clone(),
                    visible: !searching || articles.iter().any(|v| *v),
                    highlighted: self.highlighted.contains(&section.id),
                    articles: articles.clone(),
                })
                .collect(),
            no_results,
        }
    }
}

impl Component for HelpSearch {
    fn name(&self) -> &'static str {
        "help-search"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Search, Topic::Keyboard, Topic::Timer]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::SearchInput {
                scope: SearchScope::Help,
                term,
            } => self.search(term),
            UiEvent::KeyPressed {
                key: Key::Escape,
                search: Some(SearchScope::Help),
            } => self.clear(),
            UiEvent::TopicLinkClicked { section } => {
                if self.jump_to(section) {
                    return vec![Effect::Schedule {
                        timer: TimerId::HighlightClear(section.clone()),
                        after: HIGHLIGHT_DURATION,
                        repeat: false,
                    }];
                }
            }
            UiEvent::TimerFired {
                timer: TimerId::HighlightClear(section),
            } => self.clear_highlight(section),
            _ => {}
        }
        Vec::new()
    }
}
