//! Client-side search over static page content
//!
//! All matching is case-insensitive substring matching on the trimmed term.

pub mod doctors;
pub mod faq;
pub mod help;

pub use doctors::{DoctorCard, DoctorFilter, DoctorFilterView};
pub use faq::{FaqGroup, FaqGroupView, FaqItem, FaqSearch, FaqView, ALL_CATEGORIES};
pub use help::{
    no_results_message, HelpArticle, HelpSearch, HelpSection, HelpSectionView, HelpView,
    HIGHLIGHT_DURATION, POPULAR_TOPICS,
};

/// Lowercased, trimmed search term
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}
