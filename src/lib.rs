//! Payroll and timekeeping engine for a small HR administration tool:
//! period calendar, punch validation and durations, salary breakdowns
//! under a fixed contribution/tax table, and the role-based access policy
//! gating all of it. The UI, PDF rendering and SQL persistence live with
//! the callers behind the interfaces in [`store`] and [`payslip`].

pub mod access;
pub mod clock;
pub mod display;
pub mod error;
pub mod model;
pub mod payroll;
pub mod payslip;
pub mod period;
pub mod store;
pub mod timeclock;


pub use access::{
    access_for, check_mutation, may_perform, read_scope, Access, Operation, ReadScope,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use display::{format_amount, format_date, format_time};
pub use error::{CoreError, PunchTimeIssue, StoreError};
pub use model::{Actor, Employee, EmployeeId, PayrollId, PunchId, Role, UnknownRole};
pub use payroll::{calculate, PayrollBreakdown, PayrollInput, PayrollService, RateTable};
pub use payslip::{PayslipData, PayslipRenderer};
pub use period::{is_valid_period, working_days_in_month, Period, MIN_PAYROLL_YEAR};
pub use store::{
    EmployeeReader, MemoryEmployeeDirectory, MemoryPayrollStore, MemoryPunchStore, PayrollStore,
    PunchStore,
};
pub use timeclock::{validate_punch, Punch, PunchInput, TimeclockService};
