//! Field rules and per-form value/error state
//!
//! Validation failures are state, not errors: each failing field gets one
//! inline message in the form's error map.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[\d\s()\-+]+$";

static EMAIL_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
static PHONE_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Result<Regex, regex::Error>>, pattern: &str, value: &str) -> bool {
    match cell.get_or_init(|| Regex::new(pattern)) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            tracing::error!(error = %e, pattern, "Validation pattern failed to compile");
            false
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    matches(&EMAIL_RE, EMAIL_PATTERN, value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    matches(&PHONE_RE, PHONE_PATTERN, value.trim())
}

/// Input type, which decides the format check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    Date,
    TextArea,
}

/// Validation rule for one named field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub required_message: &'static str,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            required_message: REQUIRED_MESSAGE,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            required_message: REQUIRED_MESSAGE,
        }
    }

    /// Builder method: custom message for an empty required field
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.required_message = message;
        self
    }

    /// Message for the first failed check. Format checks only apply to
    /// non-empty values.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        if value.is_empty() {
            return self.required.then_some(self.required_message);
        }
        match self.kind {
            FieldKind::Email if !is_valid_email(value) => Some(EMAIL_MESSAGE),
            FieldKind::Tel if !is_valid_phone(value) => Some(PHONE_MESSAGE),
            _ => None,
        }
    }
}

/// Values and inline errors of one form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSet {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
}

impl FieldSet {
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn set_error(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Re-check one field, replacing its previous message
    pub fn validate(&mut self, rule: &FieldRule) -> bool {
        match rule.check(self.value(rule.name)) {
            Some(message) => {
                self.set_error(rule.name, message);
                false
            }
            None => {
                self.clear_error(rule.name);
                true
            }
        }
    }

    /// Re-check every rule; true when all pass
    pub fn validate_all(&mut self, rules: &[FieldRule]) -> bool {
        rules
            .iter()
            .fold(true, |valid, rule| self.validate(rule) && valid)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("  a@b.co "));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555-CALL-NOW"));
    }

    #[test]
    fn test_rule_checks() {
        let email = FieldRule::required("email", FieldKind::Email);
        assert_eq!(email.check("   "), Some(REQUIRED_MESSAGE));
        assert_eq!(email.check("nope"), Some(EMAIL_MESSAGE));
        assert_eq!(email.check("a@b.io"), None);

        let phone = FieldRule::optional("phone", FieldKind::Tel);
        assert_eq!(phone.check(""), None);
        assert_eq!(phone.check("abc"), Some(PHONE_MESSAGE));

        let visit = FieldRule::required("visitType", FieldKind::Select)
            .with_message("Please select a visit type");
        assert_eq!(visit.check(""), Some("Please select a visit type"));
    }

    #[test]
    fn test_field_set_validation() {
        let rules = [
            FieldRule::required("name", FieldKind::Text),
            FieldRule::required("email", FieldKind::Email),
        ];
        let mut fields = FieldSet::default();
        fields.set("email", "bad");

        assert!(!fields.validate_all(&rules));
        assert_eq!(fields.error("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(fields.error("email"), Some(EMAIL_MESSAGE));

        fields.set("name", "Jane");
        fields.set("email", "jane@example.com");
        assert!(fields.validate_all(&rules));
        assert!(!fields.has_errors());
    }
}
