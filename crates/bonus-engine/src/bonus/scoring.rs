use serde::{Deserialize, Serialize};

use super::domain::{BonusState, Employee, PerPillar, Pillar};
use super::overrides::get_pillars_for_emp;
use super::weights::{effective_goal_weights, effective_weights_for_pillars};

/// Caller-selected scoring behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringOptions {
    /// Upper bound applied to each goal's achievement ratio. `None` keeps
    /// overachievement unbounded.
    pub achievement_ceiling: Option<f64>,
}

/// Per-pillar achieved fractions, the effective weights that combined them,
/// and the resulting total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub fin: f64,
    pub ops: f64,
    pub ind: f64,
    pub eff: PerPillar<f64>,
    pub total: f64,
    /// Weighted goals in participating pillars that have no achievement yet.
    pub unscored_goals: usize,
}

impl ScoreBreakdown {
    pub fn achieved(&self) -> PerPillar<f64> {
        PerPillar::new(self.fin, self.ops, self.ind)
    }

    /// True when no pillar participates, so the total is 0 by construction.
    pub fn has_no_scoring_pillars(&self) -> bool {
        self.eff.sum() == 0.0
    }
}

/// Score with unbounded achievement ratios.
pub fn total_score(employee: &Employee, state: &BonusState) -> ScoreBreakdown {
    score_with(employee, state, &ScoringOptions::default())
}

pub fn score_with(
    employee: &Employee,
    state: &BonusState,
    options: &ScoringOptions,
) -> ScoreBreakdown {
    let pillars = get_pillars_for_emp(employee, state);
    let eff = effective_weights_for_pillars(pillars);

    let mut unscored_goals = 0;
    let achieved = pillars.map(|key, pillar| {
        let (fraction, missing) = pillar_fraction(pillar, options);
        if *eff.get(key) > 0.0 {
            unscored_goals += missing;
        }
        fraction
    });

    let total = achieved.fin * eff.fin + achieved.ops * eff.ops + achieved.ind * eff.ind;

    ScoreBreakdown {
        fin: achieved.fin,
        ops: achieved.ops,
        ind: achieved.ind,
        eff,
        total,
        unscored_goals,
    }
}

/// Achieved fraction of one pillar plus the count of weighted goals lacking
/// an achievement figure.
pub fn pillar_fraction(pillar: &Pillar, options: &ScoringOptions) -> (f64, usize) {
    if !pillar.enabled {
        return (0.0, 0);
    }

    let mut missing = 0;
    let fraction: f64 = pillar
        .goals
        .iter()
        .zip(effective_goal_weights(pillar))
        .map(|(goal, share)| match goal.a {
            Some(a) => share * bounded(a, options),
            None => {
                if share > 0.0 {
                    missing += 1;
                }
                0.0
            }
        })
        .sum();

    (fraction, missing)
}

fn bounded(achievement: f64, options: &ScoringOptions) -> f64 {
    let achievement = achievement.max(0.0);
    match options.achievement_ceiling {
        Some(ceiling) => achievement.min(ceiling),
        None => achievement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::domain::{Goal, PillarKey};

    #[test]
    fn disabled_pillar_contributes_nothing() {
        let mut pillar = Pillar::placeholder(PillarKey::Ops);
        pillar.goals.push(Goal::achieved("NPS", 100.0, 1.0));

        assert_eq!(pillar_fraction(&pillar, &ScoringOptions::default()), (0.0, 0));
    }

    #[test]
    fn missing_achievements_are_counted_not_assumed() {
        let mut pillar = Pillar::placeholder(PillarKey::Ind);
        pillar.enabled = true;
        pillar.weight = 1.0;
        pillar.goals = vec![
            Goal::achieved("Training", 50.0, 1.0),
            Goal::new("Mentoring", 50.0),
            Goal::new("Unweighted", 0.0),
        ];

        let (fraction, missing) = pillar_fraction(&pillar, &ScoringOptions::default());
        assert!((fraction - 0.5).abs() < 1e-12);
        assert_eq!(missing, 1);
    }

    #[test]
    fn ceiling_limits_overachievement_only_when_requested() {
        let mut pillar = Pillar::placeholder(PillarKey::Fin);
        pillar.enabled = true;
        pillar.goals = vec![Goal::achieved("Revenue", 100.0, 1.4)];

        let unbounded = pillar_fraction(&pillar, &ScoringOptions::default()).0;
        let capped = pillar_fraction(
            &pillar,
            &ScoringOptions {
                achievement_ceiling: Some(1.2),
            },
        )
        .0;

        assert!((unbounded - 1.4).abs() < 1e-12);
        assert!((capped - 1.2).abs() < 1e-12);
    }
}
