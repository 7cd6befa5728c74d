//! Doctor directory filter

use serde::{Deserialize, Serialize};

use super::normalize;
use crate::directory::ScheduleProvider;
use crate::events::{Component, Effect, SearchScope, Topic, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorCard {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorFilterView {
    /// One visibility flag per card
    pub cards: Vec<bool>,
    pub no_results: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    cards: Vec<DoctorCard>,
    term: String,
    specialty: String,
}

impl DoctorFilter {
    pub fn new(cards: Vec<DoctorCard>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    /// One card per doctor, labelled with the specialty code
    pub fn from_provider(provider: &dyn ScheduleProvider) -> Self {
        let cards = provider
            .specialties()
            .iter()
            .flat_map(|code| provider.doctors_by_specialty(code))
            .map(|doctor| DoctorCard {
                name: doctor.name,
                specialty: doctor.specialty.to_string(),
            })
            .collect();
        Self::new(cards)
    }

    pub fn cards(&self) -> &[DoctorCard] {
        &self.cards
    }

    pub fn set_term(&mut self, term: &str) {
        self.term = normalize(term);
    }

    pub fn set_specialty(&mut self, specialty: &str) {
        self.specialty = normalize(specialty);
    }

    fn shows(&self, card: &DoctorCard) -> bool {
        let matches_name = self.term.is_empty() || card.name.to_lowercase().contains(&self.term);
        let matches_specialty = self.specialty.is_empty()
            || self.specialty == "all"
            || card.specialty.to_lowercase().contains(&self.specialty);
        matches_name && matches_specialty
    }

    /// One visibility flag per card
    pub fn visibility(&self) -> Vec<bool> {
        self.cards.iter().map(|card| self.shows(card)).collect()
    }

    pub fn view(&self) -> DoctorFilterView {
        let cards = self.visibility();
        let no_results = !cards.iter().any(|v| *v);
        DoctorFilterView { cards, no_results }
    }
}

impl Component for DoctorFilter {
    fn name(&self) -> &'static str {
        "doctor-filter"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Search]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::SearchInput {
                scope: SearchScope::Doctors,
                term,
            } => self.set_term(term),
            UiEvent::CategorySelected {
                scope: SearchScope::Doctors,
                category,
            } => self.set_specialty(category),
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;

    fn card(name: &str, specialty: &str) -> DoctorCard {
        DoctorCard {
            name: name.into(),
            specialty: specialty.into(),
        }
    }

    #[test]
    fn test_name_and_specialty() {
        let mut filter = DoctorFilter::new(vec![
            card("Dr. John Smith", "Cardiology"),
            card("Dr. Sarah Williams", "General Medicine"),
            card("Dr. Emily Johnson", "Cardiology"),
        ]);
        assert_eq!(filter.visibility(), vec![true, true, true]);

        filter.handle(&UiEvent::CategorySelected {
            scope: SearchScope::Doctors,
            category: "cardiology".into(),
        });
        assert_eq!(filter.visibility(), vec![true, false, true]);

        filter.handle(&UiEvent::SearchInput {
            scope: SearchScope::Doctors,
            term: "emily".into(),
        });
        assert_eq!(filter.visibility(), vec![false, false, true]);

        filter.set_term("house");
        assert!(filter.view().no_results);

        filter.set_specialty("all");
        filter.set_term("");
        let view = filter.view();
        assert!(view.cards.iter().all(|v| *v));
        assert!(!view.no_results);
    }

    #[test]
    fn test_from_provider() {
        let filter = DoctorFilter::from_provider(&StaticDirectory::builtin());
        assert_eq!(filter.cards().len(), 13);
        assert_eq!(filter.cards()[0], card("Dr. John Smith", "cardiology"));
    }
}
