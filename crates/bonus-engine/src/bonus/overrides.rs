use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{BonusState, Department, Employee, EmployeeId, PillarSet};
use super::editor::EditError;

/// Pillar set that scores `employee`: their override if one exists, else the
/// department default.
pub fn get_pillars_for_emp<'a>(employee: &Employee, state: &'a BonusState) -> &'a PillarSet {
    state
        .emp_goal_overrides
        .get(&employee.id)
        .unwrap_or_else(|| state.pillars_by_dept.get(employee.dept))
}

pub fn has_emp_override(employee_id: &EmployeeId, state: &BonusState) -> bool {
    state.emp_goal_overrides.contains_key(employee_id)
}

/// New state with a deep copy of `pillars` installed as the employee's override.
///
/// The copy is what lets an override seeded from the department default
/// diverge from it afterwards.
pub fn set_emp_override(
    state: &BonusState,
    employee_id: &EmployeeId,
    pillars: &PillarSet,
) -> BonusState {
    let mut next = state.clone();
    next.emp_goal_overrides
        .insert(employee_id.clone(), pillars.deep_clone());
    debug!(employee = %employee_id, "employee override installed");
    next
}

/// New state without the employee's override. The override's edits are discarded.
pub fn clear_emp_override(state: &BonusState, employee_id: &EmployeeId) -> BonusState {
    let mut next = state.clone();
    if next.emp_goal_overrides.remove(employee_id).is_some() {
        debug!(employee = %employee_id, "employee override cleared");
    }
    next
}

/// Ensure the employee has an override, seeding it from their department default.
pub fn seed_emp_override(state: &BonusState, employee: &Employee) -> BonusState {
    if has_emp_override(&employee.id, state) {
        return state.clone();
    }
    set_emp_override(state, &employee.id, state.pillars_by_dept.get(employee.dept))
}

/// Editor mode: whether pillar edits target a department or one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    Dept,
    Emp,
}

/// Target of a pillar edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditScope {
    Department(Department),
    Employee(EmployeeId),
}

impl EditScope {
    pub fn for_mode(mode: ScopeMode, dept: Department, employee_id: &EmployeeId) -> Self {
        match mode {
            ScopeMode::Emp => EditScope::Employee(employee_id.clone()),
            ScopeMode::Dept => EditScope::Department(dept),
        }
    }

    /// `dept:<key>` or `emp:<id>`.
    pub fn key(&self) -> String {
        match self {
            EditScope::Department(dept) => format!("dept:{}", dept.key()),
            EditScope::Employee(id) => format!("emp:{id}"),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, EditError> {
        let trimmed = raw.trim();
        if let Some(dept) = trimmed.strip_prefix("dept:") {
            return Department::parse(dept)
                .map(EditScope::Department)
                .ok_or_else(|| EditError::InvalidScope(raw.to_string()));
        }
        if let Some(id) = trimmed.strip_prefix("emp:") {
            let id = id.trim();
            if !id.is_empty() {
                return Ok(EditScope::Employee(EmployeeId::new(id)));
            }
        }
        Err(EditError::InvalidScope(raw.to_string()))
    }

    /// Pillar set currently active for the scope, if it can be resolved.
    pub fn active_pillars<'a>(&self, state: &'a BonusState) -> Option<&'a PillarSet> {
        match self {
            EditScope::Department(dept) => Some(state.pillars_by_dept.get(*dept)),
            EditScope::Employee(id) => state
                .employee(id)
                .map(|employee| get_pillars_for_emp(employee, state)),
        }
    }
}

impl fmt::Display for EditScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
