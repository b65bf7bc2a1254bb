//! Confidence tiers and the high-WHIP caution rule.

use serde::Deserialize;

use super::runs::active_override;
use crate::types::ConfidenceTier;

/// Lower bounds (inclusive) of each tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub elite: f64,
    pub strong: f64,
    pub moderate: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            elite: 0.80,
            strong: 0.70,
            moderate: 0.60,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, true_prob: f64) -> ConfidenceTier {
        if true_prob >= self.elite {
            ConfidenceTier::Elite
        } else if true_prob >= self.strong {
            ConfidenceTier::Strong
        } else if true_prob >= self.moderate {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Risky
        }
    }
}

/// Flags a low ERA that a high WHIP suggests is flattering the pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CautionRule {
    /// WHIP strictly above this is considered high.
    pub whip_above: f64,
    /// ERA strictly below this is considered low.
    pub era_below: f64,
}

impl Default for CautionRule {
    fn default() -> Self {
        Self {
            whip_above: 1.45,
            era_below: 3.20,
        }
    }
}

impl CautionRule {
    /// Only raised when no positive xERA override was given; an override
    /// already replaces the suspect ERA.
    pub fn evaluate(&self, whip: Option<f64>, era: f64, era_override: Option<f64>) -> bool {
        if active_override(era_override).is_some() {
            return false;
        }
        match whip {
            Some(w) => w > self.whip_above && era < self.era_below,
            None => false,
        }
    }
}

/// Classify with the default thresholds (0.80 / 0.70 / 0.60).
pub fn classify_tier(true_prob: f64) -> ConfidenceTier {
    TierThresholds::default().classify(true_prob)
}

/// Evaluate with the default rule (WHIP > 1.45 and ERA < 3.20).
pub fn evaluate_caution(whip: Option<f64>, era: f64, era_override: Option<f64>) -> bool {
    CautionRule::default().evaluate(whip, era, era_override)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_inclusive() {
        assert_eq!(classify_tier(0.80), ConfidenceTier::Elite);
        assert_eq!(classify_tier(0.7999), ConfidenceTier::Strong);
        assert_eq!(classify_tier(0.70), ConfidenceTier::Strong);
        assert_eq!(classify_tier(0.6999), ConfidenceTier::Moderate);
        assert_eq!(classify_tier(0.60), ConfidenceTier::Moderate);
        assert_eq!(classify_tier(0.5999), ConfidenceTier::Risky);
    }

    #[test]
    fn test_tier_extremes() {
        assert_eq!(classify_tier(1.0), ConfidenceTier::Elite);
        assert_eq!(classify_tier(0.0), ConfidenceTier::Risky);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = TierThresholds {
            elite: 0.90,
            ..TierThresholds::default()
        };
        assert_eq!(strict.classify(0.85), ConfidenceTier::Strong);
    }

    #[test]
    fn test_caution_high_whip_low_era() {
        assert!(evaluate_caution(Some(1.50), 3.00, None));
    }

    #[test]
    fn test_caution_suppressed_by_override() {
        assert!(!evaluate_caution(Some(1.50), 3.00, Some(4.10)));
    }

    #[test]
    fn test_caution_zero_override_counts_as_unset() {
        assert!(evaluate_caution(Some(1.50), 3.00, Some(0.0)));
        assert!(evaluate_caution(Some(1.50), 3.00, Some(-1.0)));
    }

    #[test]
    fn test_caution_whip_below_threshold() {
        assert!(!evaluate_caution(Some(1.40), 3.00, None));
        assert!(!evaluate_caution(Some(1.45), 3.00, None));
    }

    #[test]
    fn test_caution_era_not_low() {
        assert!(!evaluate_caution(Some(1.60), 3.20, None));
        assert!(!evaluate_caution(Some(1.60), 4.50, None));
    }

    #[test]
    fn test_caution_without_whip() {
        assert!(!evaluate_caution(None, 2.10, None));
    }
}
