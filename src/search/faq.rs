//! FAQ search and category filter

use serde::{Deserialize, Serialize};

use super::normalize;
use crate::events::{Component, Effect, SearchScope, Topic, UiEvent};

/// Category value that shows every group
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle) || self.answer.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqGroup {
    pub category: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqGroupView {
    pub category: String,
    pub visible: bool,
    pub items: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqView {
    pub term: String,
    pub category: String,
    pub groups: Vec<FaqGroupView>,
    pub no_results: bool,
}

/// Visibility of FAQ groups and items
#[derive(Debug, Clone)]
pub struct FaqSearch {
    groups: Vec<FaqGroup>,
    term: String,
    category: String,
    group_visible: Vec<bool>,
    item_visible: Vec<Vec<bool>>,
    no_results: bool,
}

impl FaqSearch {
    /// Everything visible, category `all`
    pub fn new(groups: Vec<FaqGroup>) -> Self {
        let group_visible = vec![true; groups.len()];
        let item_visible = groups.iter().map(|g| vec![true; g.items.len()]).collect();
        Self {
            groups,
            term: String::new(),
            category: ALL_CATEGORIES.to_string(),
            group_visible,
            item_visible,
            no_results: false,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn no_results(&self) -> bool {
        self.no_results
    }

    /// Number of items currently shown
    pub fn visible_count(&self) -> usize {
        self.item_visible
            .iter()
            .flatten()
            .filter(|visible| **visible)
            .count()
    }

    /// Substring match over question and answer. A group is shown iff one
    /// of its items is.
    pub fn search(&mut self, term: &str) {
        let needle = normalize(term);
        self.term = term.to_string();

        for (group, visible) in self.groups.iter().zip(self.item_visible.iter_mut()) {
            for (item, shown) in group.items.iter().zip(visible.iter_mut()) {
                *shown = item.matches(&needle);
            }
        }
        for (shown, items) in self.group_visible.iter_mut().zip(&self.item_visible) {
            *shown = items.iter().any(|v| *v);
        }
        self.no_results = self.visible_count() == 0;
        tracing::debug!(term = %needle, visible = self.visible_count(), "FAQ search");
    }

    /// Show only one category (or `all`); clears the search
    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.term.clear();
        self.no_results = false;

        for ((group, shown), items) in self
            .groups
            .iter()
            .zip(self.group_visible.iter_mut())
            .zip(self.item_visible.iter_mut())
        {
            *shown = category == ALL_CATEGORIES || group.category == category;
            items.iter_mut().for_each(|v| *v = true);
        }
    }

    pub fn view(&self) -> FaqView {
        FaqView {
            term: self.term.clone(),
            category: self.category.clone(),
            groups: self
                .groups
                .iter()
                .zip(&self.group_visible)
                .zip(&self.item_visible)
                .map(|((group, visible), items)| FaqGroupView {
                    category: group.category.clone(),
                    visible: *visible,
                    items: items.clone(),
                })
                .collect(),
            no_results: self.no_results,
        }
    }
}

impl Component for FaqSearch {
    fn name(&self) -> &'static str {
        "faq-search"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Search]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::SearchInput {
                scope: SearchScope::Faq,
                term,
            } => self.search(term),
            UiEvent::CategorySelected {
                scope: SearchScope::Faq,
                category,
            } => self.select_category(category),
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq() -> FaqSearch {
        FaqSearch::new(vec![
            FaqGroup {
                category: "appointments".into(),
                items: vec![
                    FaqItem::new("How do I book an appointment?", "Use the online form."),
                    FaqItem::new("Can I cancel?", "Call us 24 hours ahead."),
                ],
            },
            FaqGroup {
                category: "billing".into(),
                items: vec![FaqItem::new("Which insurance do you accept?", "Most major plans.")],
            },
        ])
    }

    #[test]
    fn test_search_matches_question_and_answer() {
        let mut faq = faq();
        faq.search("  INSURANCE ");
        let view = faq.view();
        assert_eq!(view.groups[0].items, vec![false, false]);
        assert!(!view.groups[0].visible);
        assert!(view.groups[1].visible);
        assert!(!view.no_results);

        faq.search("24 hours");
        assert_eq!(faq.view().groups[0].items, vec![false, true]);
    }

    #[test]
    fn test_no_results() {
        let mut faq = faq();
        faq.search("parking");
        assert!(faq.no_results());
        assert_eq!(faq.visible_count(), 0);
        assert!(faq.view().groups.iter().all(|g| !g.visible));

        faq.search("");
        assert_eq!(faq.visible_count(), 3);
        assert!(!faq.no_results());
    }

    #[test]
    fn test_category_resets_search() {
        let mut faq = faq();
        faq.search("parking");
        faq.handle(&UiEvent::CategorySelected {
            scope: SearchScope::Faq,
            category: "billing".into(),
        });

        let view = faq.view();
        assert_eq!(view.term, "");
        assert!(!view.no_results);
        assert!(!view.groups[0].visible);
        assert!(view.groups[1].visible);
        assert_eq!(faq.visible_count(), 3);

        faq.select_category(ALL_CATEGORIES);
        assert!(faq.view().groups.iter().all(|g| g.visible));
    }

    #[test]
    fn test_other_scopes_ignored() {
        let mut faq = faq();
        faq.handle(&UiEvent::SearchInput {
            scope: SearchScope::Help,
            term: "parking".into(),
        });
        assert!(!faq.no_results());
    }
}
