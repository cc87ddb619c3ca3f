use serde::{Deserialize, Serialize};

use super::domain::{BonusState, Employee, Settings};
use super::scoring::total_score;

/// Monetary result for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    /// Salary times bonus-base months.
    pub base: f64,
    pub total: f64,
    pub factor: f64,
    pub cap: f64,
    pub payout: f64,
}

impl PayoutBreakdown {
    pub fn uncapped(&self) -> f64 {
        non_negative_or_unbounded(self.base * self.total * self.factor)
    }

    /// True when the cap, not the score, determined the payout.
    pub fn is_capped(&self) -> bool {
        self.uncapped() > self.cap
    }
}

/// Payout for `employee` using their scored total. Never fails: degenerate
/// inputs produce zeros.
pub fn payout(employee: &Employee, state: &BonusState) -> PayoutBreakdown {
    let total = total_score(employee, state).total;
    payout_for_score(employee, &state.settings, total)
}

/// Payout for an already computed total score.
pub fn payout_for_score(employee: &Employee, settings: &Settings, total: f64) -> PayoutBreakdown {
    let base = non_negative(employee.salary * employee.base_months_or(settings));
    let total = finite_or_zero(total);
    let factor = finite_or_zero(employee.factors.product());
    let cap = non_negative_or_unbounded(base * settings.cap_pct / 100.0);

    let payout = non_negative((base * total * factor).min(cap));

    PayoutBreakdown {
        base,
        total,
        factor,
        cap,
        payout,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

/// Like [`non_negative`], but a product that overflowed to `+inf` saturates
/// at `f64::MAX` instead of collapsing to zero.
fn non_negative_or_unbounded(value: f64) -> f64 {
    if value == f64::INFINITY {
        f64::MAX
    } else {
        non_negative(value)
    }
}
