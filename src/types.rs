//! Shared types for the earned-runs estimator.
//!
//! The input set, the derived metrics report and the error enum are
//! defined here so that the model and the HTTP layer can both depend on
//! them without reaching into each other.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Everything needed to simulate one upcoming start.
///
/// Constructed per request and discarded after the report is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherInputs {
    /// Display label only; echoed back on the player board.
    #[serde(default)]
    pub pitcher_name: String,
    /// Season ERA (earned runs per 9 innings).
    pub era: f64,
    pub total_innings_pitched: f64,
    pub games_started: u32,
    /// Raw comma-separated innings from the most recent starts, e.g. "5.2,6.1,5.0".
    pub recent_innings: String,
    /// xERA. A positive value replaces `era` in the run-rate calculation;
    /// zero or below is treated as unset.
    #[serde(default)]
    pub expected_era_override: Option<f64>,
    /// WHIP. Diagnostic only; feeds the caution flag.
    #[serde(default)]
    pub whip: Option<f64>,
    /// Opponent OPS.
    pub opponent_ops: f64,
    /// League-average OPS.
    pub league_ops: f64,
    #[serde(default)]
    pub park_factor: ParkFactor,
    /// American odds for the under 2.5 earned runs line.
    pub sportsbook_odds: i32,
}

impl Default for PitcherInputs {
    /// The calculator's starting form values.
    fn default() -> Self {
        Self {
            pitcher_name: String::new(),
            era: 3.50,
            total_innings_pitched: 90.0,
            games_started: 15,
            recent_innings: String::new(),
            expected_era_override: None,
            whip: None,
            opponent_ops: 0.670,
            league_ops: 0.715,
            park_factor: ParkFactor::Neutral,
            sportsbook_odds: -115,
        }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Ballpark run environment.
///
/// Serializes as kebab-case; deserializes through `FromStr`, so form labels
/// such as "Pitcher-Friendly" are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParkFactor {
    #[default]
    Neutral,
    PitcherFriendly,
    HitterFriendly,
}

impl fmt::Display for ParkFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParkFactor::Neutral => write!(f, "Neutral"),
            ParkFactor::PitcherFriendly => write!(f, "Pitcher-Friendly"),
            ParkFactor::HitterFriendly => write!(f, "Hitter-Friendly"),
        }
    }
}

/// Parse a park factor label (case-insensitive).
impl std::str::FromStr for ParkFactor {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(ParkFactor::Neutral),
            "pitcher-friendly" | "pitcher_friendly" | "pitcher" => Ok(ParkFactor::PitcherFriendly),
            "hitter-friendly" | "hitter_friendly" | "hitter" => Ok(ParkFactor::HitterFriendly),
            _ => Err(EngineError::Input(format!("unknown park factor: {s}"))),
        }
    }
}

impl<'de> Deserialize<'de> for ParkFactor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Confidence bucket for the modeled under probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Elite,
    Strong,
    Moderate,
    Risky,
}

impl ConfidenceTier {
    /// Label with the traffic-light marker used on the results panel.
    pub fn badge(&self) -> &'static str {
        match self {
            ConfidenceTier::Elite => "🟢 Elite",
            ConfidenceTier::Strong => "🟡 Strong",
            ConfidenceTier::Moderate => "🟠 Moderate",
            ConfidenceTier::Risky => "🔴 Risky",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceTier::Elite => write!(f, "Elite"),
            ConfidenceTier::Strong => write!(f, "Strong"),
            ConfidenceTier::Moderate => write!(f, "Moderate"),
            ConfidenceTier::Risky => write!(f, "Risky"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

const CAUTION_MESSAGE: &str =
    "ERA may be misleading due to high WHIP. Consider using xERA or reducing confidence.";

/// Derived metrics for one simulated start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub pitcher_name: String,
    /// Season innings per start (unrounded).
    pub baseline_innings_per_start: f64,
    /// Mean of the recent starts (unrounded).
    pub recent_innings_per_start: f64,
    pub expected_innings: f64,
    /// ERA scaled by opponent strength.
    pub effective_era: f64,
    /// Poisson rate λ for the outing.
    pub expected_earned_runs: f64,
    /// P(ER < 3) under the model.
    pub true_under_probability: f64,
    /// Market probability implied by the odds.
    pub implied_probability: f64,
    pub expected_value_percent: f64,
    pub confidence_tier: ConfidenceTier,
    pub caution_flag: bool,
}

impl MetricsReport {
    /// Warning text shown when the ERA likely understates run risk.
    pub fn caution_message(&self) -> Option<&'static str> {
        self.caution_flag.then_some(CAUTION_MESSAGE)
    }

    /// Whether the model prices the under above the market.
    pub fn has_positive_edge(&self) -> bool {
        self.expected_value_percent > 0.0
    }

    /// Summary row for the player board.
    pub fn board_row(&self) -> PlayerBoardRow {
        PlayerBoardRow {
            pitcher: self.pitcher_name.clone(),
            true_probability: format!("{:.1}%", self.true_under_probability * 100.0),
            implied_probability: format!("{:.1}%", self.implied_probability * 100.0),
            ev_percent: format!("{:.1}%", self.expected_value_percent),
            tier: self.confidence_tier.to_string(),
        }
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expected IP: {} innings", self.expected_innings)?;
        writeln!(f, "Adjusted ERA vs Opponent: {}", self.effective_era)?;
        writeln!(f, "Expected ER (λ): {}", self.expected_earned_runs)?;
        writeln!(
            f,
            "True Probability of Under 2.5 ER: {:.2}%",
            self.true_under_probability * 100.0
        )?;
        writeln!(
            f,
            "Implied Probability (from Odds): {:.2}%",
            self.implied_probability * 100.0
        )?;
        writeln!(f, "Expected Value (EV%): {}%", self.expected_value_percent)?;
        write!(f, "Difficulty Tier: {}", self.confidence_tier.badge())?;
        if let Some(msg) = self.caution_message() {
            write!(f, "\n⚠️ {msg}")?;
        }
        Ok(())
    }
}

/// One line of the player board table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBoardRow {
    pub pitcher: String,
    pub true_probability: String,
    pub implied_probability: String,
    pub ev_percent: String,
    pub tier: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failures surfaced by the estimator. A simulation either yields a full
/// report or exactly one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Division by zero: {0}")]
    Division(&'static str),
}

impl EngineError {
    /// Short machine-readable kind, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Input(_) => "input_error",
            EngineError::Division(_) => "division_error",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
