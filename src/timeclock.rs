// src/timeclock.rs
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::access::{self, Operation, ReadScope};
use crate::clock::Clock;
use crate::error::{CoreError, PunchTimeIssue};
use crate::model::{Actor, EmployeeId, PunchId};
use crate::store::PunchStore;

/// Punches before this time of day are rejected as data-entry mistakes.
static EARLIEST_PUNCH: Lazy<NaiveTime> = Lazy::new(|| NaiveTime::from_hms_opt(4, 0, 0).unwrap());

// --- Punch entity ---

/// One day's arrival/departure record for one employee. The departure is
/// absent until the employee clocks out; duration is always derived from
/// the two times, never trusted from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    pub id: PunchId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub arrival: NaiveTime,
    pub departure: Option<NaiveTime>,
    pub note: Option<String>,
}

impl Punch {
    pub fn is_complete(&self) -> bool {
        self.departure.is_some()
    }

    fn worked_minutes(&self) -> Option<i64> {
        self.departure
            .map(|departure| (departure - self.arrival).num_minutes())
    }

    /// Worked time in decimal hours; 0 while the departure is missing.
    pub fn worked_hours(&self) -> Decimal {
        match self.worked_minutes() {
            Some(minutes) => Decimal::from(minutes) / dec!(60),
            None => Decimal::ZERO,
        }
    }

    /// `"8h30"`-style label with zero-padded minutes, `"N/A"` while the
    /// departure is missing.
    pub fn duration_label(&self) -> String {
        match self.worked_minutes() {
            Some(minutes) => format!("{}h{:02}", minutes / 60, minutes % 60),
            None => "N/A".to_string(),
        }
    }
}

/// One punch submission, as collected by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchInput {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub arrival: NaiveTime,
    pub departure: Option<NaiveTime>,
    pub note: Option<String>,
}

/// Checks a punch submission against the timekeeping rules. Validation
/// runs before any store call, so a rejected punch leaves no partial
/// write. A punch cannot span midnight: a departure before the arrival is
/// rejected rather than wrapped to the next day.
pub fn validate_punch(input: &PunchInput, today: NaiveDate) -> Result<(), CoreError> {
    if input.employee_id <= 0 {
        return Err(CoreError::NegativeInput {
            field: "employee id",
            value: Decimal::from(input.employee_id),
        });
    }
    if input.date > today {
        return Err(CoreError::InvalidPunchDate { date: input.date });
    }
    if input.arrival < *EARLIEST_PUNCH {
        return Err(PunchTimeIssue::ArrivalBeforeOpening {
            arrival: input.arrival,
        }
        .into());
    }
    if let Some(departure) = input.departure {
        if departure < *EARLIEST_PUNCH {
            return Err(PunchTimeIssue::DepartureBeforeOpening { departure }.into());
        }
        if departure < input.arrival {
            return Err(PunchTimeIssue::DepartureBeforeArrival {
                arrival: input.arrival,
                departure,
            }
            .into());
        }
    }
    Ok(())
}

// --- Timekeeping service ---

/// Timekeeping operations: validated punch upserts, scoped listings and
/// punch administration, all gated by the access policy.
pub struct TimeclockService {
    store: Arc<dyn PunchStore>,
    clock: Arc<dyn Clock>,
}

impl TimeclockService {
    pub fn new(store: Arc<dyn PunchStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records or replaces the punch for (employee, date). An existing row
    /// keeps its identity; arrival, departure and note are overwritten.
    pub fn upsert_punch(&self, actor: &Actor, input: &PunchInput) -> Result<Punch, CoreError> {
        access::check_mutation(actor, Operation::PunchWrite, input.employee_id)?;
        validate_punch(input, self.clock.today())?;

        let existing = self
            .store
            .find_by_employee_and_date(input.employee_id, input.date)?;
        let punch = Punch {
            id: existing.map(|p| p.id).unwrap_or(0),
            employee_id: input.employee_id,
            date: input.date,
            arrival: input.arrival,
            departure: input.departure,
            note: input.note.clone(),
        };
        let stored = self.store.upsert(&punch)?;
        info!(
            "punch recorded: employee={} date={} duration={}",
            stored.employee_id,
            stored.date,
            stored.duration_label()
        );
        Ok(stored)
    }

    /// Punches visible to the actor. Employees always see their own rows
    /// only, whatever filter they request; staff roles see all or filter by
    /// employee.
    pub fn list_punches(
        &self,
        actor: &Actor,
        filter: Option<EmployeeId>,
    ) -> Result<Vec<Punch>, CoreError> {
        match access::read_scope(actor, Operation::PunchList, filter)? {
            ReadScope::All => Ok(self.store.list_all()?),
            ReadScope::Employee(employee_id) => Ok(self.store.list_by_employee(employee_id)?),
        }
    }

    pub fn delete_punch(&self, actor: &Actor, punch_id: PunchId) -> Result<(), CoreError> {
        access::check_mutation(actor, Operation::PunchDelete, actor.employee_id)?;
        self.store.delete_by_id(punch_id)?;
        info!("punch deleted: id={}", punch_id);
        Ok(())
    }
}
