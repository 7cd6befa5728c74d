//! Widget error types

use thiserror::Error;

/// Errors raised by widget state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// No modal with this id is registered
    #[error("Unknown modal: {0}")]
    UnknownModal(String),

    /// Accordion item index out of range
    #[error("Unknown accordion item: {index} (have {count})")]
    UnknownItem { index: usize, count: usize },

    /// Slide index out of range
    #[error("Slide {index} out of range (have {count})")]
    SlideOutOfRange { index: usize, count: usize },

    /// A slider needs at least one slide
    #[error("Slider has no slides")]
    EmptySlider,

    /// Tab id not in the group
    #[error("Unknown tab '{tab}' in group '{group}'")]
    UnknownTab { group: String, tab: String },

    /// A tab group needs at least one tab
    #[error("Tab group '{0}' has no tabs")]
    EmptyTabGroup(String),
}

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            WidgetError::UnknownModal("logoutModal".into()).to_string(),
            "Unknown modal: logoutModal"
        );
        assert_eq!(
            WidgetError::SlideOutOfRange { index: 4, count: 3 }.to_string(),
            "Slide 4 out of range (have 3)"
        );
    }
}
