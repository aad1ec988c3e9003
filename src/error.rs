// src/error.rs
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::access::Operation;
use crate::model::Role;

/// Failure raised by a repository implementation. The underlying cause is
/// carried verbatim; the core never retries.
#[derive(Error, Debug)]
#[error("repository failure: {0}")]
pub struct StoreError(#[from] anyhow::Error);

impl StoreError {
    pub fn cause(&self) -> &anyhow::Error {
        &self.0
    }
}

/// Why a punch's times were rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchTimeIssue {
    #[error("arrival {arrival} is before the earliest allowed time 04:00")]
    ArrivalBeforeOpening { arrival: NaiveTime },
    #[error("departure {departure} is before the earliest allowed time 04:00")]
    DepartureBeforeOpening { departure: NaiveTime },
    #[error("departure {departure} is before arrival {arrival}")]
    DepartureBeforeArrival {
        arrival: NaiveTime,
        departure: NaiveTime,
    },
}

/// Error surface of the core. Validation errors are reported synchronously
/// by the operation that produced them; validation precedes store calls, so
/// a rejected submission leaves no partial write.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid payroll period {month:02}/{year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("{field} must not be negative (got {value})")]
    NegativeInput { field: &'static str, value: Decimal },

    #[error("invalid punch time: {0}")]
    InvalidPunchTime(#[from] PunchTimeIssue),

    #[error("punch date {date} is in the future")]
    InvalidPunchDate { date: NaiveDate },

    #[error("net salary would be negative ({net})")]
    NegativeNet { net: Decimal },

    #[error("{role} may not perform {operation}")]
    AccessDenied { role: Role, operation: Operation },

    #[error(transparent)]
    Store(#[from] StoreError),
}
