//! Bonus allocation: pillar weights, employee overrides, scores, and capped payouts.

pub mod document;
pub mod domain;
pub mod editor;
mod engine;
pub mod overrides;
pub mod payout;
pub mod report;
pub mod sanitize;
pub mod scoring;
pub mod weights;

#[cfg(test)]
mod tests;

pub use document::{load_document, save_document, RawBonusState, StateError};
pub use domain::{
    BonusState, Department, DepartmentPillars, Employee, EmployeeId, Factors, Goal, PerPillar,
    Pillar, PillarKey, PillarSet, Settings,
};
pub use editor::{apply_edit, apply_settings_edit, EditError, PillarEdit, SettingsEdit};
pub use engine::{BonusEngine, EmployeeResult};
pub use overrides::{
    clear_emp_override, get_pillars_for_emp, has_emp_override, seed_emp_override,
    set_emp_override, EditScope, ScopeMode,
};
pub use payout::{payout, payout_for_score, PayoutBreakdown};
pub use report::{pillar_overview, ExportError, PayoutFlag, SheetReport};
pub use sanitize::Sanitizer;
pub use scoring::{score_with, total_score, ScoreBreakdown, ScoringOptions};
pub use weights::{effective_goal_weights, effective_weights_for_pillars, weight_sum};
