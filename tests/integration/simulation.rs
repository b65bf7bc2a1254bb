//! End-to-end simulations through the public API.
//!
//! Each case runs the whole model for a realistic start and checks the
//! derived metrics and how they move relative to each other.

use pitcher_er::config::AppConfig;
use pitcher_er::{simulate, ConfidenceTier, EngineError, Estimator, ParkFactor, PitcherInputs};

fn ace() -> PitcherInputs {
    PitcherInputs {
        pitcher_name: "Ace".to_string(),
        era: 2.40,
        total_innings_pitched: 120.0,
        games_started: 18,
        recent_innings: "7.0, 6.2, 7.1".to_string(),
        expected_era_override: None,
        whip: Some(0.98),
        opponent_ops: 0.650,
        league_ops: 0.715,
        park_factor: ParkFactor::PitcherFriendly,
        sportsbook_odds: -180,
    }
}

fn reference() -> PitcherInputs {
    PitcherInputs {
        pitcher_name: "Reference".to_string(),
        recent_innings: "5.2,6.1,5.0".to_string(),
        ..PitcherInputs::default()
    }
}

#[test]
fn test_reference_start_end_to_end() {
    let report = simulate(&reference()).unwrap();
    assert_eq!(report.expected_innings, 5.72);
    assert_eq!(report.effective_era, 3.28);
    assert_eq!(report.expected_earned_runs, 2.085);
    assert_eq!(report.true_under_probability, 0.6537);
    assert_eq!(report.implied_probability, 0.5349);
    assert_eq!(report.expected_value_percent, 22.21);
    assert_eq!(report.confidence_tier, ConfidenceTier::Moderate);

    let row = report.board_row();
    assert_eq!(row.pitcher, "Reference");
    assert_eq!(row.tier, "Moderate");
}

#[test]
fn test_ace_in_pitcher_park_is_strong() {
    let report = simulate(&ace()).unwrap();
    // (120/18 + 6.7667) / 2 + 0.2 = 6.9167
    assert_eq!(report.expected_innings, 6.92);
    assert_eq!(report.effective_era, 2.182);
    assert_eq!(report.expected_earned_runs, 1.678);
    assert_eq!(report.true_under_probability, 0.763);
    assert_eq!(report.confidence_tier, ConfidenceTier::Strong);
    assert_eq!(report.implied_probability, 0.6429);
    assert!(report.has_positive_edge());
    assert!(!report.caution_flag);
}

#[test]
fn test_stronger_opponent_lowers_probability() {
    let weak = simulate(&PitcherInputs { opponent_ops: 0.640, ..reference() }).unwrap();
    let strong = simulate(&PitcherInputs { opponent_ops: 0.800, ..reference() }).unwrap();
    assert!(strong.effective_era > weak.effective_era);
    assert!(strong.true_under_probability < weak.true_under_probability);
}

#[test]
fn test_longer_odds_raise_expected_value() {
    let favourite = simulate(&PitcherInputs { sportsbook_odds: -150, ..reference() }).unwrap();
    let underdog = simulate(&PitcherInputs { sportsbook_odds: 130, ..reference() }).unwrap();
    assert_eq!(favourite.true_under_probability, underdog.true_under_probability);
    assert!(underdog.implied_probability < favourite.implied_probability);
    assert!(underdog.expected_value_percent > favourite.expected_value_percent);
}

#[test]
fn test_override_replaces_era_and_clears_caution() {
    let flagged = PitcherInputs {
        era: 2.90,
        whip: Some(1.52),
        ..reference()
    };
    assert!(simulate(&flagged).unwrap().caution_flag);

    let with_xera = PitcherInputs {
        expected_era_override: Some(4.60),
        ..flagged
    };
    let report = simulate(&with_xera).unwrap();
    assert!(!report.caution_flag);
    assert!(report.caution_message().is_none());
    // 4.60 * 0.670 / 0.715
    assert_eq!(report.effective_era, 4.31);
}

#[test]
fn test_first_failure_is_returned() {
    // Bad recent innings and zero odds: parsing fails first.
    let inputs = PitcherInputs {
        recent_innings: String::new(),
        sportsbook_odds: 0,
        ..reference()
    };
    assert!(matches!(simulate(&inputs), Err(EngineError::Input(_))));
}

#[test]
fn test_estimator_from_config() {
    let cfg = AppConfig::parse(
        r#"
        [model]
        required_recent_starts = 3
        "#,
    )
    .unwrap();
    let estimator = Estimator::new(cfg.model);

    assert!(estimator.simulate(&reference()).is_ok());
    let four = PitcherInputs {
        recent_innings: "5,6,7,6".to_string(),
        ..reference()
    };
    assert!(matches!(estimator.simulate(&four), Err(EngineError::Input(_))));
}

#[test]
fn test_concurrent_simulations_agree() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| simulate(&reference()).unwrap()))
        .collect();
    let reports: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(reports.windows(2).all(|w| w[0] == w[1]));
}
