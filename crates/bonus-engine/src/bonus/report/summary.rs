use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{BonusState, Department, EmployeeId};
use super::super::engine::BonusEngine;
use super::super::overrides::has_emp_override;
use super::super::payout::PayoutBreakdown;
use super::super::scoring::ScoreBreakdown;
use super::views::{DepartmentTotalView, PayoutRowView, SheetReportSummary, SheetTotalsView};

/// Conditions a reviewer should look at before a payout is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutFlag {
    ZeroSalary,
    NoScoringPillars,
    Capped,
    UnscoredGoals,
}

impl PayoutFlag {
    pub const fn label(self) -> &'static str {
        match self {
            PayoutFlag::ZeroSalary => "zero salary",
            PayoutFlag::NoScoringPillars => "no scoring pillars",
            PayoutFlag::Capped => "capped",
            PayoutFlag::UnscoredGoals => "unscored goals",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PayoutRow {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: Department,
    pub has_override: bool,
    pub score: ScoreBreakdown,
    pub payout: PayoutBreakdown,
    pub flags: Vec<PayoutFlag>,
}

impl PayoutRow {
    pub fn to_view(&self) -> PayoutRowView {
        PayoutRowView {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            department: self.department,
            department_label: self.department.key(),
            has_override: self.has_override,
            achieved: self.score.achieved(),
            effective_weights: self.score.eff,
            total_score: self.score.total,
            base: self.payout.base,
            factor: self.payout.factor,
            cap: self.payout.cap,
            payout: self.payout.payout,
            flags: self.flags.iter().map(|flag| flag.label()).collect(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct DepartmentTotals {
    pub employees: usize,
    pub base: f64,
    pub cap: f64,
    pub payout: f64,
}

impl DepartmentTotals {
    fn add(&mut self, payout: &PayoutBreakdown) {
        self.employees += 1;
        self.base += payout.base;
        self.cap += payout.cap;
        self.payout += payout.payout;
    }
}

/// Scored and priced view of every employee on a sheet.
#[derive(Debug, Default)]
pub struct SheetReport {
    pub rows: Vec<PayoutRow>,
    pub department_totals: HashMap<Department, DepartmentTotals>,
}

impl SheetReport {
    pub fn build(state: &BonusState, engine: &BonusEngine) -> Self {
        let mut report = SheetReport::default();

        for employee in &state.employees {
            let result = engine.evaluate(employee, state);

            let mut flags = Vec::new();
            if employee.salary == 0.0 {
                flags.push(PayoutFlag::ZeroSalary);
            }
            if result.score.has_no_scoring_pillars() {
                flags.push(PayoutFlag::NoScoringPillars);
            }
            if result.payout.is_capped() {
                flags.push(PayoutFlag::Capped);
            }
            if result.score.unscored_goals > 0 {
                flags.push(PayoutFlag::UnscoredGoals);
            }

            report
                .department_totals
                .entry(employee.dept)
                .or_default()
                .add(&result.payout);

            report.rows.push(PayoutRow {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                department: employee.dept,
                has_override: has_emp_override(&employee.id, state),
                score: result.score,
                payout: result.payout,
                flags,
            });
        }

        report
    }

    pub fn row(&self, employee_id: &EmployeeId) -> Option<&PayoutRow> {
        self.rows.iter().find(|row| &row.employee_id == employee_id)
    }

    pub fn total_payout(&self) -> f64 {
        self.rows.iter().map(|row| row.payout.payout).sum()
    }

    pub fn summary(&self) -> SheetReportSummary {
        let rows = self.rows.iter().map(PayoutRow::to_view).collect();

        let departments = Department::ordered()
            .into_iter()
            .filter_map(|department| {
                self.department_totals
                    .get(&department)
                    .map(|totals| DepartmentTotalView {
                        department,
                        department_label: department.key(),
                        employees: totals.employees,
                        base: totals.base,
                        cap: totals.cap,
                        payout: totals.payout,
                    })
            })
            .collect();

        let totals = SheetTotalsView {
            employees: self.rows.len(),
            base: self.rows.iter().map(|row| row.payout.base).sum(),
            cap: self.rows.iter().map(|row| row.payout.cap).sum(),
            payout: self.total_payout(),
            flagged: self.rows.iter().filter(|row| !row.flags.is_empty()).count(),
        };

        SheetReportSummary {
            rows,
            departments,
            totals,
        }
    }
}
