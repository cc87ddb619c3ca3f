use super::domain::{PerPillar, Pillar, PillarSet};

/// Effective share of each pillar in the total score.
///
/// Only enabled pillars participate and their nominal weights are
/// renormalized to sum to 1. When no enabled pillar carries weight every
/// entry is 0 and the total score is 0.
pub fn effective_weights_for_pillars(pillars: &PillarSet) -> PerPillar<f64> {
    let participating = pillars.map(|_, pillar| {
        if pillar.enabled {
            pillar.weight
        } else {
            0.0
        }
    });

    let sum = participating.sum();
    if sum > 0.0 && sum.is_finite() {
        participating.map(|_, weight| weight / sum)
    } else {
        PerPillar::default()
    }
}

/// Raw sum of goal weights in a pillar, before any normalization.
pub fn weight_sum(pillar: &Pillar) -> f64 {
    pillar.goals.iter().map(|goal| goal.w).sum()
}

/// Per-goal share inside the pillar, in goal order.
///
/// Goals are normalized by the actual sum, so lines weighted 50/50 and 5/5
/// resolve to the same shares. A zero sum yields all zeros.
pub fn effective_goal_weights(pillar: &Pillar) -> Vec<f64> {
    let sum = weight_sum(pillar);
    if sum > 0.0 && sum.is_finite() {
        pillar.goals.iter().map(|goal| goal.w / sum).collect()
    } else {
        vec![0.0; pillar.goals.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::domain::{Goal, PillarKey};

    fn pillar(weight: f64, enabled: bool) -> Pillar {
        Pillar {
            name: "test".to_string(),
            weight,
            enabled,
            goals: Vec::new(),
            extra: Default::default(),
        }
    }

    #[test]
    fn renormalizes_enabled_pillars_to_one() {
        let set = PillarSet::new(pillar(0.2, true), pillar(0.2, true), pillar(0.1, true));
        let eff = effective_weights_for_pillars(&set);

        assert!((eff.sum() - 1.0).abs() < 1e-12);
        assert!((eff.fin - 0.4).abs() < 1e-12);
        assert!((eff.ind - 0.2).abs() < 1e-12);
    }

    #[test]
    fn disabled_pillar_gets_zero_and_remainder_is_redistributed() {
        let set = PillarSet::new(pillar(0.5, true), pillar(0.3, true), pillar(0.2, false));
        let eff = effective_weights_for_pillars(&set);

        assert_eq!(eff.ind, 0.0);
        assert!((eff.fin - 0.625).abs() < 1e-12);
        assert!((eff.ops - 0.375).abs() < 1e-12);
    }

    #[test]
    fn all_disabled_or_weightless_is_all_zero() {
        let disabled = PillarSet::new(pillar(0.5, false), pillar(0.5, false), pillar(0.0, false));
        assert_eq!(effective_weights_for_pillars(&disabled), PerPillar::default());

        let weightless = PillarSet::new(pillar(0.0, true), pillar(0.0, true), pillar(0.0, true));
        assert_eq!(effective_weights_for_pillars(&weightless).sum(), 0.0);
    }

    #[test]
    fn goal_weights_normalize_by_actual_sum() {
        let mut fin = Pillar::placeholder(PillarKey::Fin);
        fin.goals = vec![Goal::new("a", 3.0), Goal::new("b", 1.0)];

        assert_eq!(weight_sum(&fin), 4.0);
        assert_eq!(effective_goal_weights(&fin), vec![0.75, 0.25]);
    }

    #[test]
    fn zero_goal_sum_yields_zero_shares() {
        let mut fin = Pillar::placeholder(PillarKey::Fin);
        fin.goals = vec![Goal::new("a", 0.0), Goal::new("b", 0.0)];

        assert_eq!(effective_goal_weights(&fin), vec![0.0, 0.0]);
    }
}
