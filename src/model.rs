// src/model.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// --- Identifiers ---

pub type EmployeeId = i64;
pub type PayrollId = i64;
pub type PunchId = i64;

// --- Roles & actors ---

/// Closed set of operator roles. Parsed case-insensitively at the edge;
/// the legacy French token `RH` is accepted as an alias of `HR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Hr => "HR",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "HR" | "RH" => Ok(Role::Hr),
            "MANAGER" => Ok(Role::Manager),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated operator behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    /// Employee linkage; 0 means the account is not linked to an employee.
    pub employee_id: EmployeeId,
}

impl Actor {
    pub fn new(role: Role, employee_id: EmployeeId) -> Self {
        Self { role, employee_id }
    }

    pub fn is_linked_to(&self, employee_id: EmployeeId) -> bool {
        self.employee_id > 0 && self.employee_id == employee_id
    }
}

// --- Employee view ---

/// Read-side employee view supplied by an `EmployeeReader`. The core never
/// mutates employees; it reads the base salary and decorates payslips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub base_salary: Decimal,
    pub cnss_number: Option<String>,
}
