// src/period.rs
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest year payroll may be recorded for.
pub const MIN_PAYROLL_YEAR: i32 = 2000;

/// French month names, indexed 1-12.
const MONTH_NAMES: [&str; 13] = [
    "",
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Month-year pair used as the unit of payroll accrual. Ordering is
/// lexicographic on (year, month).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { year, month }
    }

    pub fn current(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES.get(self.month as usize).copied().unwrap_or("")
    }

    /// Display label in the form `"Juin 2024"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        *self == Period::current(today)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// True iff payroll may be recorded for (month, year): months 1-12, years
/// 2000 through next year, and not after the current period. Never errors;
/// callers treat `false` as the rejection signal.
pub fn is_valid_period(month: u32, year: i32, today: NaiveDate) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    if year < MIN_PAYROLL_YEAR || year > today.year() + 1 {
        return false;
    }
    Period::new(month, year) <= Period::current(today)
}

/// Number of Monday-Friday days in the month. Public holidays are not
/// consulted. Returns 0 for an invalid month.
pub fn working_days_in_month(month: u32, year: i32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return 0,
    };

    let mut count = 0;
    let mut day = first;
    while day.month() == month {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}
