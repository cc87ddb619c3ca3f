use serde::Serialize;

use super::super::domain::{BonusState, Department, EmployeeId, PerPillar, PillarKey};
use super::super::overrides::EditScope;
use super::super::weights::{effective_weights_for_pillars, weight_sum};

#[derive(Debug, Clone, Serialize)]
pub struct PayoutRowView {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: Department,
    pub department_label: &'static str,
    pub has_override: bool,
    pub achieved: PerPillar<f64>,
    pub effective_weights: PerPillar<f64>,
    pub total_score: f64,
    pub base: f64,
    pub factor: f64,
    pub cap: f64,
    pub payout: f64,
    pub flags: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentTotalView {
    pub department: Department,
    pub department_label: &'static str,
    pub employees: usize,
    pub base: f64,
    pub cap: f64,
    pub payout: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetTotalsView {
    pub employees: usize,
    pub base: f64,
    pub cap: f64,
    pub payout: f64,
    pub flagged: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetReportSummary {
    pub rows: Vec<PayoutRowView>,
    pub departments: Vec<DepartmentTotalView>,
    pub totals: SheetTotalsView,
}

/// Editor-facing description of one pillar in a scope.
#[derive(Debug, Clone, Serialize)]
pub struct PillarOverviewEntry {
    pub pillar: PillarKey,
    pub name: String,
    pub enabled: bool,
    pub weight: f64,
    pub effective_weight: f64,
    pub goal_count: usize,
    /// Raw goal weight sum ("Zbir ciljeva").
    pub goal_weight_sum: f64,
    /// Goals sum to 100. Scoring normalizes regardless; this is a display hint.
    pub goals_balanced: bool,
}

const BALANCED_GOAL_SUM: f64 = 100.0;
const BALANCE_TOLERANCE: f64 = 1e-6;

/// Overview of the pillars active for `scope`; `None` if the scope names an
/// employee missing from the sheet.
pub fn pillar_overview(state: &BonusState, scope: &EditScope) -> Option<Vec<PillarOverviewEntry>> {
    let pillars = scope.active_pillars(state)?;
    let eff = effective_weights_for_pillars(pillars);

    Some(
        pillars
            .iter()
            .map(|(key, pillar)| {
                let goal_weight_sum = weight_sum(pillar);
                PillarOverviewEntry {
                    pillar: key,
                    name: pillar.name.clone(),
                    enabled: pillar.enabled,
                    weight: pillar.weight,
                    effective_weight: *eff.get(key),
                    goal_count: pillar.goals.len(),
                    goal_weight_sum,
                    goals_balanced: (goal_weight_sum - BALANCED_GOAL_SUM).abs() < BALANCE_TOLERANCE,
                }
            })
            .collect(),
    )
}
