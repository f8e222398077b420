//! Factor-based risk scoring for prototype devices.
//!
//! The [`risk`] module holds the scoring core: factor computers, weight
//! normalization, aggregation, attribution and Monte Carlo simulation. The
//! remaining modules carry the configuration, error and telemetry plumbing used
//! by the HTTP service and CLI.

pub mod config;
pub mod error;
pub mod risk;
pub mod telemetry;

pub use risk::{
    evaluate_risk, explain_risk, simulate_risk, simulate_risk_with, DeviceProfile,
    EnvironmentContext, FactorKind, FactorWeights, RiskEngine, RiskError, RiskScoreResult,
    SimulationConfig, SimulationResult,
};
