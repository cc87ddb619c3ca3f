use super::document::{load_document, StateError};
use super::domain::{BonusState, Employee};
use super::payout::{payout_for_score, PayoutBreakdown};
use super::sanitize::Sanitizer;
use super::scoring::{score_with, ScoreBreakdown, ScoringOptions};
use crate::config::EngineConfig;

/// Stateless evaluator bundling the sanitizer policy and scoring options.
#[derive(Debug, Clone, Default)]
pub struct BonusEngine {
    sanitizer: Sanitizer,
    options: ScoringOptions,
}

/// Score and payout for one employee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeResult {
    pub score: ScoreBreakdown,
    pub payout: PayoutBreakdown,
}

impl BonusEngine {
    pub fn new(sanitizer: Sanitizer, options: ScoringOptions) -> Self {
        Self { sanitizer, options }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Sanitizer::new(config.fallback_department),
            ScoringOptions {
                achievement_ceiling: config.achievement_ceiling,
            },
        )
    }

    pub fn options(&self) -> &ScoringOptions {
        &self.options
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn load(&self, raw: &str) -> Result<BonusState, StateError> {
        load_document(raw, &self.sanitizer)
    }

    pub fn sanitize(&self, state: &BonusState) -> BonusState {
        self.sanitizer.sanitize(state)
    }

    pub fn score(&self, employee: &Employee, state: &BonusState) -> ScoreBreakdown {
        score_with(employee, state, &self.options)
    }

    pub fn payout(&self, employee: &Employee, state: &BonusState) -> PayoutBreakdown {
        self.evaluate(employee, state).payout
    }

    pub fn evaluate(&self, employee: &Employee, state: &BonusState) -> EmployeeResult {
        let score = self.score(employee, state);
        let payout = payout_for_score(employee, &state.settings, score.total);
        EmployeeResult { score, payout }
    }
}
