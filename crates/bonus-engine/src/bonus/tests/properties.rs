use super::common::*;
use crate::bonus::domain::{Goal, PillarKey, PillarSet};
use crate::bonus::payout::payout;
use crate::bonus::scoring::{pillar_fraction, total_score, ScoringOptions};
use crate::bonus::weights::effective_weights_for_pillars;

#[test]
fn effective_weights_sum_to_one_for_every_enabled_combination() {
    let weights = [0.7, 0.2, 0.45];
    for mask in 1u8..8 {
        let set = PillarSet::from_fn(|key| {
            let index = key as usize;
            pillar("p", weights[index], mask & (1 << index) != 0, Vec::new())
        });

        let eff = effective_weights_for_pillars(&set);
        assert_close(eff.sum(), 1.0);
        for (key, pillar) in set.iter() {
            if !pillar.enabled {
                assert_eq!(*eff.get(key), 0.0, "disabled {key:?} must not participate");
            }
        }
    }
}

#[test]
fn disabling_a_pillar_redistributes_proportionally() {
    let mut set = office_pillars();
    set.ops.enabled = true;
    set.ops.weight = 0.5;
    let before = effective_weights_for_pillars(&set);

    set.ops.enabled = false;
    let after = effective_weights_for_pillars(&set);

    assert_eq!(after.ops, 0.0);
    assert_close(after.fin + after.ind, 1.0);
    assert_close(after.fin / after.ind, before.fin / before.ind);
}

#[test]
fn scaling_goal_weights_keeps_pillar_fraction() {
    let base = pillar(
        "Finance",
        1.0,
        true,
        vec![
            Goal::achieved("Revenue", 30.0, 0.9),
            Goal::achieved("Cost", 50.0, 1.3),
            Goal::achieved("Cash", 20.0, 0.4),
        ],
    );
    let options = ScoringOptions::default();
    let (expected, _) = pillar_fraction(&base, &options);

    for scale in [0.1, 1.0, 7.5, 1000.0] {
        let mut scaled = base.clone();
        for goal in &mut scaled.goals {
            goal.w *= scale;
        }
        assert_close(pillar_fraction(&scaled, &options).0, expected);
    }
}

#[test]
fn reference_scenario_pays_base() {
    let state = sheet();
    let employee = ana();

    let score = total_score(&employee, &state);
    assert_close(score.eff.fin, 0.5);
    assert_close(score.eff.ops, 0.5);
    assert_eq!(score.eff.ind, 0.0);
    assert_close(score.total, 1.0);

    let result = payout(&employee, &state);
    assert_eq!(result.base, 4000.0);
    assert_eq!(result.cap, 6000.0);
    assert_eq!(result.factor, 1.0);
    assert_close(result.payout, 4000.0);
}

#[test]
fn payout_equals_cap_whenever_the_product_exceeds_it() {
    let mut state = sheet();
    state.pillars_by_dept.restaurant_lead.fin.goals[0].a = Some(3.0);
    let mut employee = ana();
    employee.factors.size = 1.5;
    state.employees[0] = employee.clone();

    let result = payout(&employee, &state);

    assert!(result.base * result.total * result.factor > result.cap);
    assert_eq!(result.payout, result.cap);
}

#[test]
fn zero_salary_yields_zero_base_and_payout() {
    let mut state = sheet();
    let mut employee = ana();
    employee.salary = 0.0;
    employee.factors.tenure = 2.0;
    state.pillars_by_dept.restaurant_lead.ops.goals[0].a = Some(5.0);

    let result = payout(&employee, &state);

    assert_eq!(result.base, 0.0);
    assert_eq!(result.cap, 0.0);
    assert_eq!(result.payout, 0.0);
}

#[test]
fn no_enabled_pillar_scores_zero() {
    let mut state = sheet();
    for key in PillarKey::ordered() {
        state.pillars_by_dept.restaurant_lead.get_mut(key).enabled = false;
    }

    let score = total_score(&ana(), &state);
    assert_eq!(score.total, 0.0);
    assert!(score.has_no_scoring_pillars());
    assert_eq!(payout(&ana(), &state).payout, 0.0);
}

#[test]
fn scoring_is_repeatable_between_calls() {
    let state = sheet();
    let first = total_score(&marko(), &state);
    let second = total_score(&marko(), &state);

    assert_eq!(first, second);
    // Office: fin 0.6*1.0 + 0.4*0.5 = 0.8 at 0.4, ind 1.0 at 0.6
    assert_close(first.total, 0.8 * 0.4 + 1.0 * 0.6);
}
