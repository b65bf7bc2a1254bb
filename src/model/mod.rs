//! Estimation engine: expected workload → run rate → Poisson under
//! probability → market comparison → tier.

pub mod innings;
pub mod odds;
pub mod runs;
pub mod tier;

use rust_decimal::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::types::{EngineError, MetricsReport, PitcherInputs};
use innings::{compute_expected_innings, mean, parse_recent_innings};
use odds::{compute_expected_value, compute_implied_probability};
use runs::{active_override, compute_effective_era, compute_expected_earned_runs, compute_under_probability};
use tier::{CautionRule, TierThresholds};

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Innings added for pitcher-friendly parks, subtracted for hitter-friendly.
    pub park_adjustment: f64,
    pub tiers: TierThresholds,
    pub caution: CautionRule,
    /// When set, the recent-innings list must have exactly this many values.
    pub required_recent_starts: Option<usize>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            park_adjustment: 0.2,
            tiers: TierThresholds::default(),
            caution: CautionRule::default(),
            required_recent_starts: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Stateless apart from its configuration; safe to share across tasks.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: ModelConfig,
}

impl Estimator {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run the full model for one start. Stops at the first failure.
    pub fn simulate(&self, inputs: &PitcherInputs) -> Result<MetricsReport, EngineError> {
        let recent = parse_recent_innings(&inputs.recent_innings)?;
        if let Some(required) = self.config.required_recent_starts {
            if recent.len() != required {
                return Err(EngineError::Input(format!(
                    "expected {required} recent innings values, got {}",
                    recent.len()
                )));
            }
        }

        let expected_innings = compute_expected_innings(
            inputs.total_innings_pitched,
            inputs.games_started,
            &recent,
            inputs.park_factor,
            self.config.park_adjustment,
        )?;
        // Both guarded above: games_started > 0 and recent is non-empty.
        let baseline_innings_per_start = inputs.total_innings_pitched / f64::from(inputs.games_started);
        let recent_innings_per_start = mean(&recent).unwrap_or_default();

        let era_override = active_override(inputs.expected_era_override);
        let effective_era = compute_effective_era(
            inputs.era,
            era_override,
            inputs.opponent_ops,
            inputs.league_ops,
        )?;
        let expected_earned_runs = compute_expected_earned_runs(effective_era, expected_innings);
        let true_under_probability = compute_under_probability(expected_earned_runs);

        let implied_probability = compute_implied_probability(inputs.sportsbook_odds)?;
        let expected_value_percent = compute_expected_value(true_under_probability, implied_probability)?;

        let confidence_tier = self.config.tiers.classify(true_under_probability);
        let caution_flag = self
            .config
            .caution
            .evaluate(inputs.whip, inputs.era, era_override);

        if caution_flag {
            warn!(
                pitcher = %inputs.pitcher_name,
                whip = ?inputs.whip,
                era = inputs.era,
                "High WHIP with low ERA, run risk may be understated"
            );
        }

        info!(
            pitcher = %inputs.pitcher_name,
            expected_ip = expected_innings,
            lambda = expected_earned_runs,
            true_prob = %format!("{:.1}%", true_under_probability * 100.0),
            implied_prob = %format!("{:.1}%", implied_probability * 100.0),
            ev = %format!("{expected_value_percent:.2}%"),
            tier = %confidence_tier,
            "Simulation complete"
        );

        Ok(MetricsReport {
            pitcher_name: inputs.pitcher_name.clone(),
            baseline_innings_per_start,
            recent_innings_per_start,
            expected_innings,
            effective_era,
            expected_earned_runs,
            true_under_probability,
            implied_probability,
            expected_value_percent,
            confidence_tier,
            caution_flag,
        })
    }
}

/// Simulate with the default model configuration.
pub fn simulate(inputs: &PitcherInputs) -> Result<MetricsReport, EngineError> {
    Estimator::default().simulate(inputs)
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round the exact binary value of `value` to `dp` decimal places, ties to even.
///
/// Non-finite or out-of-range values are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    to_decimal_dp(value, dp)
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

fn to_decimal_dp(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
