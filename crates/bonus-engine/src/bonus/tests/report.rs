use super::common::*;
use crate::bonus::domain::{Department, EmployeeId, PillarKey};
use crate::bonus::engine::BonusEngine;
use crate::bonus::overrides::{set_emp_override, EditScope};
use crate::bonus::report::{pillar_overview, PayoutFlag, SheetReport};

#[test]
fn report_prices_every_employee_and_totals_by_department() {
    let state = sheet();
    let report = SheetReport::build(&state, &BonusEngine::default());

    assert_eq!(report.rows.len(), 2);
    let ana_row = report.row(&ana().id).expect("ana priced");
    assert_close(ana_row.payout.payout, 4000.0);
    assert!(ana_row.flags.is_empty());

    let summary = report.summary();
    assert_eq!(summary.departments.len(), 2);
    assert_eq!(summary.departments[0].department, Department::RestaurantLead);
    assert_eq!(summary.totals.employees, 2);
    assert_close(summary.totals.payout, report.total_payout());
}

#[test]
fn report_flags_degenerate_rows() {
    let mut state = sheet();
    state.employees[0].salary = 0.0;
    state.pillars_by_dept.office.fin.goals[0].a = None;

    let report = SheetReport::build(&state, &BonusEngine::default());

    let ana_row = report.row(&ana().id).expect("present");
    assert!(ana_row.flags.contains(&PayoutFlag::ZeroSalary));
    let marko_row = report.row(&marko().id).expect("present");
    assert!(marko_row.flags.contains(&PayoutFlag::UnscoredGoals));
    assert_eq!(report.summary().totals.flagged, 2);
}

#[test]
fn report_marks_override_rows_and_capped_payouts() {
    let mut custom = restaurant_pillars();
    custom.fin.goals[0].a = Some(4.0);
    let state = set_emp_override(&sheet(), &ana().id, &custom);

    let report = SheetReport::build(&state, &BonusEngine::default());
    let row = report.row(&ana().id).expect("present");

    assert!(row.has_override);
    assert!(row.flags.contains(&PayoutFlag::Capped));
    assert_eq!(row.payout.payout, row.payout.cap);
}

#[test]
fn csv_export_has_header_and_one_line_per_employee() {
    let report = SheetReport::build(&sheet(), &BonusEngine::default());
    let mut buffer = Vec::new();
    report.write_csv(&mut buffer).expect("csv writes");

    let text = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("employee_id,name,department"));
    assert!(lines[1].starts_with("e1,Ana,RL"));
}

#[test]
fn pillar_overview_reports_goal_sums_for_scope() {
    let state = sheet();

    let overview = pillar_overview(&state, &EditScope::Department(Department::Office))
        .expect("department resolves");
    let fin = overview
        .iter()
        .find(|entry| entry.pillar == PillarKey::Fin)
        .expect("fin present");
    assert_eq!(fin.goal_weight_sum, 100.0);
    assert!(fin.goals_balanced);
    assert_close(fin.effective_weight, 0.4);

    let ops = &overview[1];
    assert_eq!(ops.goal_count, 0);
    assert!(!ops.goals_balanced);

    assert!(pillar_overview(&state, &EditScope::Employee(EmployeeId::new("ghost"))).is_none());
}
