use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::document::{RawBonusState, RawPillar, RawPillarSet, RawSettings};
use super::domain::{
    BonusState, Department, DepartmentPillars, Employee, EmployeeId, Factors, Goal, Pillar,
    PillarKey, PillarSet, Settings, DEFAULT_BASE_MONTHS, DEFAULT_CAP_PCT,
};

/// Restores the structural invariants the engine relies on.
///
/// Corrections are silent towards callers (historical sheets must stay
/// usable) and reported through `tracing` at debug level.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    fallback_department: Department,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(Department::RestaurantLead)
    }
}

impl Sanitizer {
    pub fn new(fallback_department: Department) -> Self {
        Self {
            fallback_department,
        }
    }

    pub fn fallback_department(&self) -> Department {
        self.fallback_department
    }

    /// Corrected copy of a typed state. Idempotent.
    pub fn sanitize(&self, state: &BonusState) -> BonusState {
        BonusState {
            settings: sanitize_settings(&state.settings),
            employees: state.employees.iter().map(sanitize_employee).collect(),
            pillars_by_dept: DepartmentPillars::from_fn(|dept| {
                sanitize_pillar_set(state.pillars_by_dept.get(dept))
            }),
            emp_goal_overrides: state
                .emp_goal_overrides
                .iter()
                .map(|(id, set)| (id.clone(), sanitize_pillar_set(set)))
                .collect(),
            extra: state.extra.clone(),
        }
    }

    /// Build a typed state from a loosely parsed document.
    pub fn sanitize_raw(&self, raw: RawBonusState) -> BonusState {
        let RawBonusState {
            settings,
            employees,
            pillars_by_dept,
            emp_goal_overrides,
            extra,
        } = raw;

        let settings = settings_from_raw(settings.unwrap_or_default());

        let employees = employees
            .into_iter()
            .map(|employee| {
                let id = EmployeeId::from(employee.id);
                let dept = match employee.dept.as_deref().and_then(Department::parse) {
                    Some(dept) => dept,
                    None => {
                        warn!(
                            employee = %id,
                            dept = ?employee.dept,
                            fallback = %self.fallback_department,
                            "unknown department, using fallback"
                        );
                        self.fallback_department
                    }
                };
                let factors = employee.factors.unwrap_or_default();
                let parsed = Employee {
                    name: employee.name.unwrap_or_else(|| id.to_string()),
                    id,
                    dept,
                    salary: employee.salary.unwrap_or(0.0),
                    base_months: employee.base_months,
                    factors: Factors {
                        tenure: factors.tenure.unwrap_or(1.0),
                        size: factors.size.unwrap_or(1.0),
                        office: factors.office.unwrap_or(1.0),
                    },
                    extra: employee.extra,
                };
                sanitize_employee(&parsed)
            })
            .collect();

        // Keys that only differ in case name the same department. The canonical
        // spelling wins, otherwise the first key in sorted order is kept.
        let mut by_key: BTreeMap<Department, (String, RawPillarSet)> = BTreeMap::new();
        for (key, set) in pillars_by_dept {
            let Some(dept) = Department::parse(&key) else {
                warn!(department = %key, "dropping pillar set for unknown department");
                continue;
            };
            match by_key.get(&dept).map(|(kept, _)| kept.clone()) {
                None => {
                    by_key.insert(dept, (key, set));
                }
                Some(kept) if key != dept.key() => {
                    warn!(department = %dept, kept = %kept, dropped = %key, "duplicate pillar set for department");
                }
                Some(kept) => {
                    warn!(department = %dept, kept = %key, dropped = %kept, "duplicate pillar set for department");
                    by_key.insert(dept, (key, set));
                }
            }
        }
        let pillars_by_dept = DepartmentPillars::from_fn(|dept| match by_key.remove(&dept) {
            Some((_, set)) => pillar_set_from_raw(set),
            None => {
                debug!(department = %dept, "department pillar set missing, using placeholder");
                PillarSet::placeholder()
            }
        });

        let emp_goal_overrides = emp_goal_overrides
            .into_iter()
            .map(|(id, set)| (EmployeeId(id.trim().to_string()), pillar_set_from_raw(set)))
            .collect();

        BonusState {
            settings,
            employees,
            pillars_by_dept,
            emp_goal_overrides,
            extra,
        }
    }
}

fn settings_from_raw(raw: RawSettings) -> Settings {
    sanitize_settings(&Settings {
        base_months: raw.base_months.unwrap_or(DEFAULT_BASE_MONTHS),
        cap_pct: raw.cap_pct.unwrap_or(DEFAULT_CAP_PCT),
        extra: raw.extra,
    })
}

fn pillar_set_from_raw(raw: RawPillarSet) -> PillarSet {
    let RawPillarSet { fin, ops, ind } = raw;
    PillarSet::new(
        pillar_from_raw(PillarKey::Fin, fin),
        pillar_from_raw(PillarKey::Ops, ops),
        pillar_from_raw(PillarKey::Ind, ind),
    )
}

fn pillar_from_raw(key: PillarKey, raw: Option<RawPillar>) -> Pillar {
    let Some(raw) = raw else {
        return Pillar::placeholder(key);
    };

    let pillar = Pillar {
        name: raw.name.unwrap_or_else(|| key.label().to_string()),
        weight: raw.weight.unwrap_or(0.0),
        enabled: raw.enabled.unwrap_or(false),
        goals: raw
            .goals
            .into_iter()
            .map(|goal| Goal {
                name: goal.name.unwrap_or_default(),
                w: goal.w.unwrap_or(0.0),
                a: goal.a,
                extra: goal.extra,
            })
            .collect(),
        extra: raw.extra,
    };
    sanitize_pillar(key, &pillar)
}

pub(crate) fn sanitize_settings(settings: &Settings) -> Settings {
    Settings {
        base_months: non_negative_or(settings.base_months, DEFAULT_BASE_MONTHS),
        cap_pct: non_negative_or(settings.cap_pct, DEFAULT_CAP_PCT),
        extra: settings.extra.clone(),
    }
}

fn non_negative_or(value: f64, default: f64) -> f64 {
    if !value.is_finite() {
        default
    } else {
        value.max(0.0)
    }
}

fn sanitize_employee(employee: &Employee) -> Employee {
    let salary = sanitize_salary(employee.salary);
    if salary != employee.salary {
        debug!(employee = %employee.id, salary = employee.salary, "salary clamped to 0");
    }

    Employee {
        id: employee.id.clone(),
        name: employee.name.clone(),
        dept: employee.dept,
        salary,
        base_months: sanitize_base_months(employee.base_months),
        factors: Factors {
            tenure: sanitize_factor(employee.factors.tenure),
            size: sanitize_factor(employee.factors.size),
            office: sanitize_factor(employee.factors.office),
        },
        extra: employee.extra.clone(),
    }
}

pub(crate) fn sanitize_salary(salary: f64) -> f64 {
    if salary.is_finite() && salary > 0.0 {
        salary
    } else {
        0.0
    }
}

pub(crate) fn sanitize_base_months(base_months: Option<f64>) -> Option<f64> {
    base_months.filter(|months| months.is_finite() && *months >= 0.0)
}

/// Non-positive factors would zero or invert the payout; they reset to neutral.
pub(crate) fn sanitize_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        1.0
    }
}

pub(crate) fn sanitize_pillar_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub(crate) fn sanitize_goal_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}

pub(crate) fn sanitize_achievement(a: Option<f64>) -> Option<f64> {
    a.map(|value| {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    })
}

fn sanitize_pillar_set(set: &PillarSet) -> PillarSet {
    set.map(sanitize_pillar)
}

fn sanitize_pillar(key: PillarKey, pillar: &Pillar) -> Pillar {
    let weight = sanitize_pillar_weight(pillar.weight);
    if weight != pillar.weight {
        debug!(pillar = key.key(), weight = pillar.weight, "pillar weight clamped");
    }

    Pillar {
        name: pillar.name.clone(),
        weight,
        enabled: pillar.enabled,
        goals: pillar
            .goals
            .iter()
            .map(|goal| {
                let w = sanitize_goal_weight(goal.w);
                if w != goal.w {
                    debug!(pillar = key.key(), goal = %goal.name, w = goal.w, "goal weight clamped");
                }
                Goal {
                    name: goal.name.clone(),
                    w,
                    a: sanitize_achievement(goal.a),
                    extra: goal.extra.clone(),
                }
            })
            .collect(),
        extra: pillar.extra.clone(),
    }
}
