use std::fmt::Write;

use bonus_engine::bonus::report::views::PillarOverviewEntry;
use bonus_engine::bonus::{EditScope, SheetReport};
use chrono::NaiveDate;

pub(crate) fn render_report_table(report: &SheetReport, today: NaiveDate) -> String {
    let summary = report.summary();
    let mut out = String::new();

    let _ = writeln!(out, "Bonus payouts (generated {today})");

    if summary.rows.is_empty() {
        let _ = writeln!(out, "\nNo employees on the sheet");
        return out;
    }

    let _ = writeln!(out, "\nEmployees");
    for row in &summary.rows {
        let override_note = if row.has_override { " [override]" } else { "" };
        let _ = writeln!(
            out,
            "- {} ({}, {}){}: score {:.3}, base {:.2}, factor {:.3}, cap {:.2}, payout {:.2}",
            row.name,
            row.employee_id,
            row.department_label,
            override_note,
            row.total_score,
            row.base,
            row.factor,
            row.cap,
            row.payout
        );
        if !row.flags.is_empty() {
            let _ = writeln!(out, "  flags: {}", row.flags.join(", "));
        }
    }

    let _ = writeln!(out, "\nDepartment totals");
    for dept in &summary.departments {
        let _ = writeln!(
            out,
            "- {}: {} employee(s), base {:.2}, payout {:.2}",
            dept.department_label, dept.employees, dept.base, dept.payout
        );
    }

    let _ = writeln!(
        out,
        "\nTotal payout {:.2} across {} employee(s); {} flagged for review",
        summary.totals.payout, summary.totals.employees, summary.totals.flagged
    );

    out
}

pub(crate) fn render_pillar_overview(scope: &EditScope, overview: &[PillarOverviewEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pillars for {scope}");

    for entry in overview {
        let state = if entry.enabled { "enabled" } else { "disabled" };
        let balance_note = if entry.goals_balanced || entry.goal_count == 0 {
            String::new()
        } else {
            format!(" (goals sum to {:.1}, not 100)", entry.goal_weight_sum)
        };
        let _ = writeln!(
            out,
            "- {} [{}] {}: weight {:.2}, effective {:.2}, {} goal(s){}",
            entry.name,
            entry.pillar.key(),
            state,
            entry.weight,
            entry.effective_weight,
            entry.goal_count,
            balance_note
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonus_engine::bonus::{pillar_overview, BonusEngine, BonusState, Department};

    const SHEET: &str = r#"{
      "settings": { "baseMonths": 2, "capPct": 150 },
      "employees": [ { "id": "e1", "name": "Ana", "dept": "RL", "salary": 2000 } ],
      "pillarsByDept": {
        "RL": {
          "fin": { "name": "Finance", "weight": 0.5, "enabled": true,
                   "goals": [ { "name": "EBITDA", "w": 60, "a": 0.8 } ] },
          "ops": { "name": "Operations", "weight": 0.5, "enabled": true,
                   "goals": [ { "name": "Guest score", "w": 100, "a": 1.2 } ] }
        }
      }
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date")
    }

    #[test]
    fn table_lists_employees_and_totals() {
        let state = BonusState::from_json(SHEET).expect("sheet loads");
        let report = SheetReport::build(&state, &BonusEngine::default());

        let table = render_report_table(&report, today());

        assert!(table.starts_with("Bonus payouts (generated 2025-12-31)"));
        assert!(table.contains("- Ana (e1, RL): score 1.000"));
        assert!(table.contains("payout 4000.00"));
        assert!(table.contains("- RL: 1 employee(s)"));
    }

    #[test]
    fn empty_sheet_renders_placeholder() {
        let report = SheetReport::build(&BonusState::default(), &BonusEngine::default());
        assert!(render_report_table(&report, today()).contains("No employees on the sheet"));
    }

    #[test]
    fn pillar_overview_highlights_unbalanced_goals() {
        let state = BonusState::from_json(SHEET).expect("sheet loads");
        let scope = EditScope::Department(Department::RestaurantLead);
        let overview = pillar_overview(&state, &scope).expect("department resolves");

        let rendered = render_pillar_overview(&scope, &overview);

        assert!(rendered.starts_with("Pillars for dept:RL"));
        assert!(rendered.contains("Finance [fin] enabled"));
        assert!(rendered.contains("goals sum to 60.0, not 100"));
        assert!(rendered.contains("Individual [ind] disabled"));
    }
}
