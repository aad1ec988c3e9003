// src/payroll.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::access::{self, Operation, ReadScope};
use crate::clock::Clock;
use crate::error::CoreError;
use crate::model::{Actor, EmployeeId, PayrollId};
use crate::payslip::PayslipData;
use crate::period::{self, Period};
use crate::store::{EmployeeReader, PayrollStore};

// --- Rate table ---

fn default_cnss_rate() -> Decimal {
    dec!(0.07)
}
fn default_amo_rate() -> Decimal {
    dec!(0.02)
}
fn default_income_tax_rate() -> Decimal {
    dec!(0.15)
}
fn default_overtime_multiplier() -> Decimal {
    dec!(1.25)
}

/// Contribution and tax rates applied to every payroll run. One replaceable
/// configuration group; there are no per-employee overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(default = "default_cnss_rate")]
    pub cnss_rate: Decimal,
    #[serde(default = "default_amo_rate")]
    pub amo_rate: Decimal,
    #[serde(default = "default_income_tax_rate")]
    pub income_tax_rate: Decimal,
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            cnss_rate: default_cnss_rate(),
            amo_rate: default_amo_rate(),
            income_tax_rate: default_income_tax_rate(),
            overtime_multiplier: default_overtime_multiplier(),
        }
    }
}

impl RateTable {
    /// Reads overrides from `GRH_`-prefixed environment variables
    /// (`GRH_CNSS_RATE`, `GRH_AMO_RATE`, `GRH_INCOME_TAX_RATE`,
    /// `GRH_OVERTIME_MULTIPLIER`). Unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::prefixed("GRH_").from_env::<RateTable>()?)
    }
}

// --- Input & breakdown ---

/// One payroll submission. Constructed per run, validated, consumed by the
/// calculator, discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    pub employee_id: EmployeeId,
    pub month: u32,
    pub year: i32,
    pub base_salary: Decimal,
    pub overtime_hours: Decimal,
    pub overtime_rate: Decimal,
    pub bonuses: Decimal,
    pub benefits: Decimal,
    pub manual_deductions: Decimal,
    pub notes: Option<String>,
}

/// Derived salary breakdown for one employee and period. Immutable once
/// produced; the persisted row is authoritative and is never recomputed on
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub id: PayrollId,
    pub employee_id: EmployeeId,
    pub period: Period,
    pub gross: Decimal,
    pub cnss: Decimal,
    pub amo: Decimal,
    pub social_contributions: Decimal,
    pub taxable_base: Decimal,
    pub income_tax: Decimal,
    pub manual_deductions: Decimal,
    pub total_deductions: Decimal,
    pub net: Decimal,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}

/// Derives the monthly breakdown from a submission. Arithmetic is exact
/// decimal; nothing is rounded here. A computation that would yield a
/// negative net is rejected rather than clamped.
pub fn calculate(
    input: &PayrollInput,
    rates: &RateTable,
    today: NaiveDate,
) -> Result<PayrollBreakdown, CoreError> {
    if !period::is_valid_period(input.month, input.year, today) {
        return Err(CoreError::InvalidPeriod {
            month: input.month,
            year: input.year,
        });
    }
    if input.employee_id <= 0 {
        return Err(CoreError::NegativeInput {
            field: "employee id",
            value: Decimal::from(input.employee_id),
        });
    }
    for (field, value) in [
        ("base salary", input.base_salary),
        ("overtime hours", input.overtime_hours),
        ("overtime rate", input.overtime_rate),
        ("bonuses", input.bonuses),
        ("benefits", input.benefits),
        ("manual deductions", input.manual_deductions),
    ] {
        if value < Decimal::ZERO {
            return Err(CoreError::NegativeInput { field, value });
        }
    }

    let overtime_pay = input.overtime_hours * input.overtime_rate * rates.overtime_multiplier;
    let gross = input.base_salary + input.bonuses + input.benefits + overtime_pay;
    let cnss = gross * rates.cnss_rate;
    let amo = gross * rates.amo_rate;
    let social_contributions = cnss + amo;
    let taxable_base = gross - social_contributions;
    let income_tax = (taxable_base * rates.income_tax_rate).max(Decimal::ZERO);
    let total_deductions = social_contributions + income_tax + input.manual_deductions;
    let net = gross - total_deductions;
    if net < Decimal::ZERO {
        warn!(
            "payroll rejected: employee={} period={:02}/{} net={}",
            input.employee_id, input.month, input.year, net
        );
        return Err(CoreError::NegativeNet { net });
    }

    Ok(PayrollBreakdown {
        id: 0,
        employee_id: input.employee_id,
        period: Period::new(input.month, input.year),
        gross,
        cnss,
        amo,
        social_contributions,
        taxable_base,
        income_tax,
        manual_deductions: input.manual_deductions,
        total_deductions,
        net,
        payment_date: today,
        notes: input.notes.clone(),
    })
}

// --- Payroll service ---

/// Payroll operations: calculation, persistence under the one-row-per-period
/// upsert contract, scoped listings and payslip assembly.
pub struct PayrollService {
    store: Arc<dyn PayrollStore>,
    employees: Arc<dyn EmployeeReader>,
    rates: RateTable,
    clock: Arc<dyn Clock>,
}

impl PayrollService {
    pub fn new(
        store: Arc<dyn PayrollStore>,
        employees: Arc<dyn EmployeeReader>,
        rates: RateTable,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            employees,
            rates,
            clock,
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Validates, calculates and persists a payroll run. A repeat
    /// submission for the same (employee, period) replaces the prior row,
    /// including its payment date.
    pub fn submit(&self, actor: &Actor, input: &PayrollInput) -> Result<PayrollBreakdown, CoreError> {
        access::check_mutation(actor, Operation::PayrollWrite, input.employee_id)?;
        let breakdown = calculate(input, &self.rates, self.clock.today())?;
        let stored = self.store.upsert(&breakdown)?;
        info!(
            "payroll recorded: employee={} period={} net={}",
            stored.employee_id, stored.period, stored.net
        );
        Ok(stored)
    }

    /// Persists an already-calculated breakdown under the same access and
    /// upsert rules as [`PayrollService::submit`].
    pub fn save_breakdown(
        &self,
        actor: &Actor,
        breakdown: &PayrollBreakdown,
    ) -> Result<PayrollBreakdown, CoreError> {
        access::check_mutation(actor, Operation::PayrollWrite, breakdown.employee_id)?;
        Ok(self.store.upsert(breakdown)?)
    }

    pub fn delete_breakdown(&self, actor: &Actor, id: PayrollId) -> Result<(), CoreError> {
        access::check_mutation(actor, Operation::PayrollWrite, actor.employee_id)?;
        self.store.delete_by_id(id)?;
        info!("payroll deleted: id={}", id);
        Ok(())
    }

    /// All rows for staff roles, own rows only for employees.
    pub fn list_breakdowns(&self, actor: &Actor) -> Result<Vec<PayrollBreakdown>, CoreError> {
        match access::read_scope(actor, Operation::PayrollList, None)? {
            ReadScope::All => Ok(self.store.list_all()?),
            ReadScope::Employee(employee_id) => Ok(self.store.list_by_employee(employee_id)?),
        }
    }

    /// Joins a stored breakdown with the employee directory view for
    /// payslip rendering, subject to the payroll read scope. A row outside
    /// the actor's scope is indistinguishable from an absent one.
    pub fn payslip(
        &self,
        actor: &Actor,
        payroll_id: PayrollId,
    ) -> Result<Option<PayslipData>, CoreError> {
        let scope = access::read_scope(actor, Operation::PayrollList, None)?;
        let breakdown = match self.store.find_by_id(payroll_id)? {
            Some(breakdown) => breakdown,
            None => return Ok(None),
        };
        if let ReadScope::Employee(own_id) = scope {
            if breakdown.employee_id != own_id {
                return Ok(None);
            }
        }
        let employee = self.employees.find_by_id(breakdown.employee_id)?;
        Ok(Some(PayslipData::new(employee, breakdown)))
    }
}
