use crate::bonus::domain::{
    BonusState, Department, DepartmentPillars, Employee, Goal, Pillar, PillarSet, Settings,
};

pub(super) fn pillar(name: &str, weight: f64, enabled: bool, goals: Vec<Goal>) -> Pillar {
    Pillar {
        name: name.to_string(),
        weight,
        enabled,
        goals,
        extra: Default::default(),
    }
}

/// Department set from the reference scenario: fin and ops at 0.5, ind disabled.
pub(super) fn restaurant_pillars() -> PillarSet {
    PillarSet::new(
        pillar(
            "Finance",
            0.5,
            true,
            vec![Goal::achieved("EBITDA", 100.0, 0.8)],
        ),
        pillar(
            "Operations",
            0.5,
            true,
            vec![Goal::achieved("Guest score", 100.0, 1.2)],
        ),
        pillar(
            "Individual",
            0.3,
            false,
            vec![Goal::achieved("Training", 100.0, 1.0)],
        ),
    )
}

pub(super) fn office_pillars() -> PillarSet {
    PillarSet::new(
        pillar(
            "Finance",
            0.4,
            true,
            vec![
                Goal::achieved("Budget", 60.0, 1.0),
                Goal::achieved("Receivables", 40.0, 0.5),
            ],
        ),
        pillar("Operations", 0.0, false, Vec::new()),
        pillar(
            "Individual",
            0.6,
            true,
            vec![Goal::achieved("Projects", 100.0, 1.0)],
        ),
    )
}

pub(super) fn ana() -> Employee {
    Employee::new("e1", "Ana", Department::RestaurantLead, 2000.0)
}

pub(super) fn marko() -> Employee {
    Employee::new("e2", "Marko", Department::Office, 3000.0)
}

pub(super) fn sheet() -> BonusState {
    let mut pillars_by_dept = DepartmentPillars::default();
    pillars_by_dept.restaurant_lead = restaurant_pillars();
    pillars_by_dept.office = office_pillars();

    BonusState {
        settings: Settings {
            base_months: 2.0,
            cap_pct: 150.0,
            ..Settings::default()
        },
        employees: vec![ana(), marko()],
        pillars_by_dept,
        ..BonusState::default()
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
