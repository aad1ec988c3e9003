// src/store.rs
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::model::{Employee, EmployeeId, PayrollId, PunchId};
use crate::payroll::PayrollBreakdown;
use crate::period::Period;
use crate::timeclock::Punch;

// --- Repository interfaces ---

/// Persistence for payroll breakdowns. Implementations must enforce the
/// (employee, period) uniqueness key and provide read-your-writes for a
/// single session. The core treats every call as an atomic unit and never
/// retries.
pub trait PayrollStore: Send + Sync {
    /// Insert-or-replace keyed by (employee_id, period). Returns the stored
    /// row with its id assigned; a replaced row keeps its identity.
    fn upsert(&self, breakdown: &PayrollBreakdown) -> Result<PayrollBreakdown, StoreError>;
    fn delete_by_id(&self, id: PayrollId) -> Result<(), StoreError>;
    fn find_by_id(&self, id: PayrollId) -> Result<Option<PayrollBreakdown>, StoreError>;
    fn list_all(&self) -> Result<Vec<PayrollBreakdown>, StoreError>;
    fn list_by_employee(&self, employee_id: EmployeeId)
        -> Result<Vec<PayrollBreakdown>, StoreError>;
}

/// Persistence for daily punches, keyed by (employee_id, date).
pub trait PunchStore: Send + Sync {
    fn upsert(&self, punch: &Punch) -> Result<Punch, StoreError>;
    fn delete_by_id(&self, id: PunchId) -> Result<(), StoreError>;
    fn find_by_id(&self, id: PunchId) -> Result<Option<Punch>, StoreError>;
    fn find_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<Punch>, StoreError>;
    fn list_all(&self) -> Result<Vec<Punch>, StoreError>;
    fn list_by_employee(&self, employee_id: EmployeeId) -> Result<Vec<Punch>, StoreError>;
}

/// Read-only employee lookup used for base salaries and payslip
/// decoration.
pub trait EmployeeReader: Send + Sync {
    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;
}

// --- In-memory implementations ---
//
// Serve the tests and small single-operator deployments; a SQL-backed
// implementation lives with the application shell.

#[derive(Default)]
struct PayrollRows {
    rows: HashMap<(EmployeeId, Period), PayrollBreakdown>,
    next_id: PayrollId,
}

#[derive(Default, Clone)]
pub struct MemoryPayrollStore {
    inner: Arc<Mutex<PayrollRows>>,
}

impl PayrollStore for MemoryPayrollStore {
    fn upsert(&self, breakdown: &PayrollBreakdown) -> Result<PayrollBreakdown, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (breakdown.employee_id, breakdown.period);
        let existing_id = inner.rows.get(&key).map(|row| row.id);
        let id = match existing_id {
            Some(id) => id,
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };
        let mut stored = breakdown.clone();
        stored.id = id;
        inner.rows.insert(key, stored.clone());
        Ok(stored)
    }

    fn delete_by_id(&self, id: PayrollId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.retain(|_, row| row.id != id);
        Ok(())
    }

    fn find_by_id(&self, id: PayrollId) -> Result<Option<PayrollBreakdown>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.values().find(|row| row.id == id).cloned())
    }

    fn list_all(&self) -> Result<Vec<PayrollBreakdown>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner.rows.values().cloned().collect();
        rows.sort_by_key(|row| (row.employee_id, row.period));
        Ok(rows)
    }

    fn list_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<PayrollBreakdown>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .rows
            .values()
            .filter(|row| row.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.period);
        Ok(rows)
    }
}

#[derive(Default)]
struct PunchRows {
    rows: HashMap<(EmployeeId, NaiveDate), Punch>,
    next_id: PunchId,
}

#[derive(Default, Clone)]
pub struct MemoryPunchStore {
    inner: Arc<Mutex<PunchRows>>,
}

impl PunchStore for MemoryPunchStore {
    fn upsert(&self, punch: &Punch) -> Result<Punch, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (punch.employee_id, punch.date);
        let existing_id = inner.rows.get(&key).map(|row| row.id);
        let id = match existing_id {
            Some(id) => id,
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };
        let mut stored = punch.clone();
        stored.id = id;
        inner.rows.insert(key, stored.clone());
        Ok(stored)
    }

    fn delete_by_id(&self, id: PunchId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.retain(|_, row| row.id != id);
        Ok(())
    }

    fn find_by_id(&self, id: PunchId) -> Result<Option<Punch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.values().find(|row| row.id == id).cloned())
    }

    fn find_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<Punch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&(employee_id, date)).cloned())
    }

    fn list_all(&self) -> Result<Vec<Punch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner.rows.values().cloned().collect();
        rows.sort_by_key(|row| (row.employee_id, row.date));
        Ok(rows)
    }

    fn list_by_employee(&self, employee_id: EmployeeId) -> Result<Vec<Punch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .rows
            .values()
            .filter(|row| row.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.date);
        Ok(rows)
    }
}

/// In-memory employee directory for tests and demos.
#[derive(Default, Clone)]
pub struct MemoryEmployeeDirectory {
    employees: Arc<Mutex<HashMap<EmployeeId, Employee>>>,
}

impl MemoryEmployeeDirectory {
    pub fn insert(&self, employee: Employee) {
        self.employees
            .lock()
            .unwrap()
            .insert(employee.id, employee);
    }
}

impl EmployeeReader for MemoryEmployeeDirectory {
    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.lock().unwrap().get(&id).cloned())
    }
}
