//! Device risk scoring: factor computers, weighting, attribution, and Monte Carlo
//! simulation over perturbed environment contexts.

mod attribution;
pub mod domain;
mod engine;
pub mod factors;
pub mod router;
mod scoring;
pub mod simulator;
pub mod weights;

#[cfg(test)]
mod tests;

pub use attribution::compute_attribution;
pub use domain::{
    DeviceProfile, EnvironmentContext, FactorKind, FactorSet, RiskError, RiskFactorResult,
    RiskScoreResult, SimulationConfig, SimulationResult, UnknownFactorKind, MAX_PATHS,
};
pub use engine::{
    evaluate_risk, explain_risk, simulate_risk, simulate_risk_with, RiskEngine,
};
pub use factors::compute_all_factors;
pub use router::risk_router;
pub use scoring::{compute_risk_score, weighted_score};
pub use simulator::{run_monte_carlo, ShockSource};
pub use weights::{normalize_weights, FactorWeights};
