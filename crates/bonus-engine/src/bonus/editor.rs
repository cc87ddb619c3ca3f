use tracing::debug;

use super::domain::{BonusState, EmployeeId, Goal, PillarKey, PillarSet};
use super::overrides::{seed_emp_override, EditScope};
use super::sanitize::{
    sanitize_achievement, sanitize_goal_weight, sanitize_pillar_weight, sanitize_settings,
};

/// Single change to the pillar set of a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum PillarEdit {
    AddGoal {
        pillar: PillarKey,
        name: String,
        w: f64,
    },
    RemoveGoal {
        pillar: PillarKey,
        index: usize,
    },
    RenameGoal {
        pillar: PillarKey,
        index: usize,
        name: String,
    },
    SetGoalWeight {
        pillar: PillarKey,
        index: usize,
        w: f64,
    },
    SetGoalAchievement {
        pillar: PillarKey,
        index: usize,
        a: Option<f64>,
    },
    SetPillarWeight {
        pillar: PillarKey,
        weight: f64,
    },
    SetPillarEnabled {
        pillar: PillarKey,
        enabled: bool,
    },
    RenamePillar {
        pillar: PillarKey,
        name: String,
    },
}

impl PillarEdit {
    pub fn pillar(&self) -> PillarKey {
        match self {
            PillarEdit::AddGoal { pillar, .. }
            | PillarEdit::RemoveGoal { pillar, .. }
            | PillarEdit::RenameGoal { pillar, .. }
            | PillarEdit::SetGoalWeight { pillar, .. }
            | PillarEdit::SetGoalAchievement { pillar, .. }
            | PillarEdit::SetPillarWeight { pillar, .. }
            | PillarEdit::SetPillarEnabled { pillar, .. }
            | PillarEdit::RenamePillar { pillar, .. } => *pillar,
        }
    }
}

/// Change to the sheet-wide settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsEdit {
    BaseMonths(f64),
    CapPct(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("employee {0} is not on the bonus sheet")]
    UnknownEmployee(EmployeeId),
    #[error("goal {index} does not exist in pillar {pillar:?} ({len} goals)")]
    GoalOutOfRange {
        pillar: PillarKey,
        index: usize,
        len: usize,
    },
    #[error("invalid edit scope '{0}', expected dept:<department> or emp:<id>")]
    InvalidScope(String),
}

/// Apply `edit` to the pillar set active for `scope`, returning a new state.
///
/// An employee scope without an override first gets one seeded from the
/// department default, so employee-mode edits never touch the default.
pub fn apply_edit(
    state: &BonusState,
    scope: &EditScope,
    edit: PillarEdit,
) -> Result<BonusState, EditError> {
    let mut next = match scope {
        EditScope::Department(_) => state.clone(),
        EditScope::Employee(id) => {
            let employee = state
                .employee(id)
                .ok_or_else(|| EditError::UnknownEmployee(id.clone()))?;
            seed_emp_override(state, employee)
        }
    };

    let pillars = match scope {
        EditScope::Department(dept) => next.pillars_by_dept.get_mut(*dept),
        EditScope::Employee(id) => next
            .emp_goal_overrides
            .get_mut(id)
            .ok_or_else(|| EditError::UnknownEmployee(id.clone()))?,
    };

    debug!(scope = %scope, edit = ?edit, "applying pillar edit");
    apply_to_pillars(pillars, edit)?;
    Ok(next)
}

fn apply_to_pillars(pillars: &mut PillarSet, edit: PillarEdit) -> Result<(), EditError> {
    let key = edit.pillar();
    let pillar = pillars.get_mut(key);

    match edit {
        PillarEdit::AddGoal { name, w, .. } => {
            pillar.goals.push(Goal::new(name, sanitize_goal_weight(w)));
        }
        PillarEdit::RemoveGoal { index, .. } => {
            check_index(key, index, pillar.goals.len())?;
            pillar.goals.remove(index);
        }
        PillarEdit::RenameGoal { index, name, .. } => {
            check_index(key, index, pillar.goals.len())?;
            pillar.goals[index].name = name;
        }
        PillarEdit::SetGoalWeight { index, w, .. } => {
            check_index(key, index, pillar.goals.len())?;
            pillar.goals[index].w = sanitize_goal_weight(w);
        }
        PillarEdit::SetGoalAchievement { index, a, .. } => {
            check_index(key, index, pillar.goals.len())?;
            pillar.goals[index].a = sanitize_achievement(a);
        }
        PillarEdit::SetPillarWeight { weight, .. } => {
            pillar.weight = sanitize_pillar_weight(weight);
        }
        PillarEdit::SetPillarEnabled { enabled, .. } => {
            pillar.enabled = enabled;
        }
        PillarEdit::RenamePillar { name, .. } => {
            pillar.name = name;
        }
    }

    Ok(())
}

fn check_index(pillar: PillarKey, index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::GoalOutOfRange { pillar, index, len })
    }
}

pub fn apply_settings_edit(state: &BonusState, edit: SettingsEdit) -> BonusState {
    let mut next = state.clone();
    match edit {
        SettingsEdit::BaseMonths(months) => next.settings.base_months = months,
        SettingsEdit::CapPct(pct) => next.settings.cap_pct = pct,
    }
    next.settings = sanitize_settings(&next.settings);
    debug!(edit = ?edit, "settings updated");
    next
}
