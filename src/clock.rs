// src/clock.rs
use chrono::{Duration, Local, NaiveDate};
use std::sync::{Arc, Mutex};

/// Source of "today" for every date-dependent rule (period validity, punch
/// dates, payment stamps). Injected so those rules stay deterministic under
/// test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock calendar date in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests.
#[derive(Clone)]
pub struct FixedClock {
    current_date: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    pub fn new(date_str: &str) -> Self {
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .expect("Failed to parse date string in FixedClock::new");
        Self {
            current_date: Arc::new(Mutex::new(date)),
        }
    }

    pub fn set_date(&self, date_str: &str) {
        *self.current_date.lock().unwrap() = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .expect("Failed to parse date string in FixedClock::set_date");
    }

    pub fn advance_days(&self, days: i64) {
        let mut guard = self.current_date.lock().unwrap();
        *guard += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.current_date.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_settable_and_advanceable() {
        let clock = FixedClock::new("2024-06-03");
        assert_eq!(clock.today().to_string(), "2024-06-03");

        clock.advance_days(28);
        assert_eq!(clock.today().to_string(), "2024-07-01");

        clock.set_date("2025-01-31");
        assert_eq!(clock.today().to_string(), "2025-01-31");
    }
}
