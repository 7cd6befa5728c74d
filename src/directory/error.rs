//! Directory loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a directory from a file
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to read directory file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse directory: {0}")]
    Parse(String),

    #[error("Specialty entry has an empty code")]
    EmptyCode,

    #[error("Duplicate doctor id: {0}")]
    DuplicateDoctor(String),

    #[error("Duplicate specialty code: {0}")]
    DuplicateSpecialty(String),

    #[error("time_slots must list at least one slot")]
    EmptyTimeSlots,
}

impl From<toml::de::Error> for DirectoryError {
    fn from(err: toml::de::Error) -> Self {
        DirectoryError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DirectoryError::DuplicateDoctor("c1".to_string());
        assert_eq!(err.to_string(), "Duplicate doctor id: c1");
        assert_eq!(
            DirectoryError::EmptyCode.to_string(),
            "Specialty entry has an empty code"
        );
        assert_eq!(
            DirectoryError::DuplicateSpecialty("neurology".to_string()).to_string(),
            "Duplicate specialty code: neurology"
        );
    }
}
