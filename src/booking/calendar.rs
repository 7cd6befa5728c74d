//! Date rules for the appointment picker
//!
//! The calendar widget itself belongs to the host; this module supplies the
//! disabling predicate, the picker configuration and date formatting.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use super::error::{BookingError, BookingResult, UnavailableReason};

/// Format the picker reports dates in
pub const PICKER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Long form used in confirmations, e.g. `Monday, March 10, 2025`
pub const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Source of "today" for the past-date rule
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Which days the picker offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePolicy {
    /// Earliest selectable day (today)
    pub min_date: NaiveDate,
    pub disable_weekends: bool,
}

impl DatePolicy {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            min_date: today,
            disable_weekends: true,
        }
    }

    /// Builder method: toggle the weekend rule
    pub fn weekends_disabled(mut self, disabled: bool) -> Self {
        self.disable_weekends = disabled;
        self
    }

    /// Reason a day is refused, if any
    pub fn unavailable_reason(&self, date: NaiveDate) -> Option<UnavailableReason> {
        if date < self.min_date {
            Some(UnavailableReason::Past)
        } else if self.disable_weekends && is_weekend(date) {
            Some(UnavailableReason::Weekend)
        } else {
            None
        }
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.unavailable_reason(date).is_none()
    }

    pub fn check(&self, date: NaiveDate) -> BookingResult<()> {
        match self.unavailable_reason(date) {
            Some(reason) => Err(BookingError::DateUnavailable { date, reason }),
            None => Ok(()),
        }
    }

    /// Configuration handed to the host's date picker
    pub fn picker_config(&self) -> DatePickerConfig {
        let disabled_weekdays = if self.disable_weekends {
            vec![Weekday::Sat, Weekday::Sun]
        } else {
            Vec::new()
        };

        DatePickerConfig {
            min_date: self.min_date.format(PICKER_DATE_FORMAT).to_string(),
            date_format: PICKER_DATE_FORMAT,
            disabled_weekdays,
        }
    }
}

/// Serializable picker setup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePickerConfig {
    pub min_date: String,
    pub date_format: &'static str,
    pub disabled_weekdays: Vec<Weekday>,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parse a date string as reported by the picker
pub fn parse_picker_date(value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), PICKER_DATE_FORMAT)
        .map_err(|_| BookingError::InvalidDate(value.to_string()))
}

/// `Monday, March 10, 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekends_unselectable() {
        let policy = DatePolicy::new(date(2025, 3, 3));
        // 2025-03-08 is a Saturday, 03-09 a Sunday
        assert!(!policy.is_selectable(date(2025, 3, 8)));
        assert!(!policy.is_selectable(date(2025, 3, 9)));
        assert!(policy.is_selectable(date(2025, 3, 10)));

        for offset in 0..28 {
            let day = date(2025, 3, 3) + chrono::Duration::days(offset);
            assert_eq!(policy.is_selectable(day), !is_weekend(day));
        }
    }

    #[test]
    fn test_past_dates_unselectable() {
        let policy = DatePolicy::new(date(2025, 3, 10));
        assert!(policy.is_selectable(date(2025, 3, 10)));
        assert_eq!(
            policy.unavailable_reason(date(2025, 3, 7)),
            Some(UnavailableReason::Past)
        );
        assert!(!policy.is_selectable(date(2024, 12, 31)));
    }

    #[test]
    fn test_weekend_rule_can_be_lifted() {
        let policy = DatePolicy::new(date(2025, 3, 3)).weekends_disabled(false);
        assert!(policy.is_selectable(date(2025, 3, 8)));
        assert!(policy.picker_config().disabled_weekdays.is_empty());
    }

    #[test]
    fn test_picker_config() {
        let config = DatePolicy::new(date(2025, 3, 3)).picker_config();
        assert_eq!(config.min_date, "2025-03-03");
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.disabled_weekdays, vec![Weekday::Sat, Weekday::Sun]);
    }

    #[test]
    fn test_long_date() {
        assert_eq!(format_long_date(date(2025, 3, 10)), "Monday, March 10, 2025");
        assert_eq!(format_long_date(date(2025, 12, 1)), "Monday, December 1, 2025");
    }

    #[test]
    fn test_parse_picker_date() {
        assert_eq!(parse_picker_date("2025-03-10").unwrap(), date(2025, 3, 10));
        assert!(matches!(
            parse_picker_date("03/10/2025"),
            Err(BookingError::InvalidDate(_))
        ));
        assert!(parse_picker_date("").is_err());
    }
}
