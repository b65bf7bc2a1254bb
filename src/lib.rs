//! Pitcher ER Pro — under 2.5 earned runs estimator.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod api;
pub mod config;
pub mod model;
pub mod types;

pub use model::{simulate, Estimator, ModelConfig};
pub use types::{ConfidenceTier, EngineError, MetricsReport, ParkFactor, PitcherInputs, PlayerBoardRow};
