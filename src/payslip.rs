// src/payslip.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::display::{format_amount, format_date};
use crate::model::Employee;
use crate::payroll::PayrollBreakdown;

/// Everything a payslip document needs: the stored breakdown plus the
/// employee directory view used for decoration. The employee may be absent
/// if the directory no longer holds the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipData {
    pub employee: Option<Employee>,
    pub breakdown: PayrollBreakdown,
}

impl PayslipData {
    pub fn new(employee: Option<Employee>, breakdown: PayrollBreakdown) -> Self {
        Self {
            employee,
            breakdown,
        }
    }

    pub fn title(&self) -> &'static str {
        "FICHE DE PAIE"
    }

    pub fn period_line(&self) -> String {
        format!("Période : {}", self.breakdown.period.label())
    }

    /// Identity block rows, in display order. Absent fields are skipped.
    pub fn employee_lines(&self) -> Vec<(String, String)> {
        let employee = match &self.employee {
            Some(employee) => employee,
            None => {
                return vec![(
                    "Nom".to_string(),
                    format!("Employé #{}", self.breakdown.employee_id),
                )]
            }
        };

        let mut lines = vec![("Nom".to_string(), employee.full_name.clone())];
        if let Some(job_title) = &employee.job_title {
            lines.push(("Poste".to_string(), job_title.clone()));
        }
        if let Some(department) = &employee.department {
            lines.push(("Service".to_string(), department.clone()));
        }
        if let Some(hire_date) = employee.hire_date {
            lines.push(("Date d'embauche".to_string(), format_date(hire_date)));
        }
        if let Some(cnss_number) = &employee.cnss_number {
            lines.push(("N° CNSS".to_string(), cnss_number.clone()));
        }
        lines
    }

    /// Salary table rows: gross, the withholdings, then the net line.
    pub fn salary_lines(&self) -> Vec<(String, String)> {
        let breakdown = &self.breakdown;
        let mut lines = vec![
            ("Salaire brut".to_string(), format_amount(breakdown.gross)),
            (
                "Cotisations CNSS".to_string(),
                format_amount(breakdown.cnss),
            ),
            ("Cotisations AMO".to_string(), format_amount(breakdown.amo)),
            (
                "Impôt sur le revenu".to_string(),
                format_amount(breakdown.income_tax),
            ),
        ];
        if breakdown.manual_deductions > Decimal::ZERO {
            lines.push((
                "Retenues".to_string(),
                format_amount(breakdown.manual_deductions),
            ));
        }
        lines.push(("Salaire net".to_string(), format_amount(breakdown.net)));
        lines
    }

    pub fn render_to(&self, renderer: &dyn PayslipRenderer, target: &Path) -> anyhow::Result<()> {
        renderer.render(self, target)
    }
}

/// Produces the document artifact (a PDF in the desktop app) at a path
/// chosen by the caller. Opaque to the core; implementations live with the
/// UI shell.
pub trait PayslipRenderer: Send + Sync {
    fn render(&self, slip: &PayslipData, target: &Path) -> anyhow::Result<()>;
}
