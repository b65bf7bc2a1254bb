//! Market side: American odds to implied probability, and the relative
//! edge of the modeled probability over it.

use super::round_dp;
use crate::types::EngineError;

/// Implied win probability of American odds, rounded to 4 decimals.
///
/// Favourites (negative) pay less than they risk: `|odds| / (|odds| + 100)`.
/// Underdogs (positive): `100 / (odds + 100)`.
pub fn compute_implied_probability(american_odds: i32) -> Result<f64, EngineError> {
    if american_odds == 0 {
        return Err(EngineError::Input("American odds cannot be zero".to_string()));
    }
    let odds = f64::from(american_odds);
    let implied = if american_odds < 0 {
        odds.abs() / (odds.abs() + 100.0)
    } else {
        100.0 / (odds + 100.0)
    };
    Ok(round_dp(implied, 4))
}

/// Expected value in percent, rounded to 2 decimals.
pub fn compute_expected_value(true_prob: f64, implied_prob: f64) -> Result<f64, EngineError> {
    if implied_prob == 0.0 {
        return Err(EngineError::Division("implied probability"));
    }
    Ok(round_dp((true_prob - implied_prob) / implied_prob * 100.0, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implied_favourite() {
        assert_eq!(compute_implied_probability(-115).unwrap(), 0.5349);
        assert_eq!(compute_implied_probability(-200).unwrap(), 0.6667);
    }

    #[test]
    fn test_implied_underdog() {
        assert_eq!(compute_implied_probability(120).unwrap(), 0.4545);
        assert_eq!(compute_implied_probability(100).unwrap(), 0.5);
    }

    #[test]
    fn test_implied_even_money_both_signs() {
        assert_eq!(
            compute_implied_probability(-100).unwrap(),
            compute_implied_probability(100).unwrap()
        );
    }

    #[test]
    fn test_implied_zero_odds_rejected() {
        assert!(matches!(compute_implied_probability(0), Err(EngineError::Input(_))));
    }

    #[test]
    fn test_expected_value() {
        assert_eq!(compute_expected_value(0.6537, 0.5349).unwrap(), 22.21);
        assert_eq!(compute_expected_value(0.5, 0.5).unwrap(), 0.0);
        assert!(compute_expected_value(0.40, 0.5349).unwrap() < 0.0);
    }

    #[test]
    fn test_expected_value_zero_implied() {
        assert_eq!(
            compute_expected_value(0.6, 0.0),
            Err(EngineError::Division("implied probability"))
        );
    }
}
