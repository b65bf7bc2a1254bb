//! Run-rate model: opponent-adjusted ERA, expected earned runs and the
//! Poisson probability of allowing fewer than three.

use tracing::debug;

use super::round_dp;
use crate::types::EngineError;

/// Earned runs allowed strictly below this count the under as a win.
pub const UNDER_LINE_RUNS: u32 = 3;

/// An xERA override only counts when positive; zero or below means unset.
pub fn active_override(era_override: Option<f64>) -> Option<f64> {
    era_override.filter(|v| *v > 0.0)
}

/// ERA scaled by opponent OPS relative to league OPS, rounded to 3 decimals.
///
/// A positive override (xERA) replaces the season ERA.
pub fn compute_effective_era(
    era: f64,
    era_override: Option<f64>,
    opponent_ops: f64,
    league_ops: f64,
) -> Result<f64, EngineError> {
    if league_ops == 0.0 {
        return Err(EngineError::Division("league average OPS"));
    }
    let era_override = active_override(era_override);
    let used_era = era_override.unwrap_or(era);
    let effective = round_dp(used_era * (opponent_ops / league_ops), 3);

    debug!(
        used_era,
        overridden = era_override.is_some(),
        opponent_ops,
        league_ops,
        effective,
        "Effective ERA"
    );
    Ok(effective)
}

/// Poisson rate λ for the outing, rounded to 3 decimals.
///
/// Negative inputs are not rejected; they yield a degenerate λ and it is
/// the caller's job to keep ERA and innings non-negative.
pub fn compute_expected_earned_runs(effective_era: f64, expected_innings: f64) -> f64 {
    round_dp(effective_era * (expected_innings / 9.0), 3)
}

/// Poisson probability mass for `0..=max_k`, built by recurrence.
pub fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let mut out = Vec::with_capacity(max_k as usize + 1);
    let mut p = (-lambda).exp();
    out.push(p);
    for k in 1..=max_k {
        p *= lambda / f64::from(k);
        out.push(p);
    }
    out
}

/// P(X < 3) for X ~ Poisson(λ), rounded to 4 decimals.
pub fn compute_under_probability(lambda: f64) -> f64 {
    let total: f64 = poisson_pmf(lambda, UNDER_LINE_RUNS - 1).iter().sum();
    round_dp(total, 4)
}
