//! Workload projection.
//!
//! Blends season-long innings per start with recent form and nudges the
//! result for the ballpark.

use tracing::debug;

use super::round_dp;
use crate::types::{EngineError, ParkFactor};

/// Parse comma-separated innings, e.g. `"5.2, 6.1,5.0"`.
///
/// Blank tokens are skipped. Values are read as plain decimals.
pub fn parse_recent_innings(text: &str) -> Result<Vec<f64>, EngineError> {
    let mut values = Vec::new();

    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let value: f64 = token
            .parse()
            .map_err(|_| EngineError::Input(format!("recent innings value is not a number: {token:?}")))?;
        if !value.is_finite() {
            return Err(EngineError::Input(format!("recent innings value is not finite: {token:?}")));
        }
        values.push(value);
    }

    if values.is_empty() {
        return Err(EngineError::Input(
            "enter recent innings separated by commas (e.g. 5.2,6.1,5.0)".to_string(),
        ));
    }

    Ok(values)
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Innings-per-start adjustment for the park, given the configured step.
pub fn park_adjustment(park: ParkFactor, step: f64) -> f64 {
    match park {
        ParkFactor::PitcherFriendly => step,
        ParkFactor::HitterFriendly => -step,
        ParkFactor::Neutral => 0.0,
    }
}

/// Expected innings for the next start, rounded to 2 decimals.
///
/// `(season IP / starts + mean(recent)) / 2 + park adjustment`
pub fn compute_expected_innings(
    total_innings_pitched: f64,
    games_started: u32,
    recent_innings: &[f64],
    park: ParkFactor,
    park_step: f64,
) -> Result<f64, EngineError> {
    if games_started == 0 {
        return Err(EngineError::Division("games started"));
    }
    let baseline = total_innings_pitched / f64::from(games_started);
    let trend = mean(recent_innings)
        .ok_or_else(|| EngineError::Input("no recent innings supplied".to_string()))?;
    let adjustment = park_adjustment(park, park_step);

    let expected = round_dp((baseline + trend) / 2.0 + adjustment, 2);

    debug!(baseline, trend, adjustment, expected, park = %park, "Expected innings");
    Ok(expected)
}
