use rand::rngs::StdRng;
use rand::SeedableRng;

use super::domain::{
    DeviceProfile, EnvironmentContext, RiskError, RiskScoreResult, SimulationConfig,
    SimulationResult,
};
use super::factors::compute_all_factors;
use super::scoring::compute_risk_score;
use super::simulator::{run_monte_carlo, ShockSource};
use super::weights::FactorWeights;

/// Stateless evaluator carrying the default weights and simulation settings
/// applied when a caller does not supply its own.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    weights: FactorWeights,
    simulation: SimulationConfig,
}

impl RiskEngine {
    pub fn new(weights: FactorWeights) -> Self {
        Self {
            weights,
            simulation: SimulationConfig::default(),
        }
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Deterministic single-point evaluation.
    pub fn evaluate(
        &self,
        profile: &DeviceProfile,
        context: &EnvironmentContext,
        weights: Option<&FactorWeights>,
    ) -> Result<RiskScoreResult, RiskError> {
        let weights = weights.unwrap_or(&self.weights);
        let factors = compute_all_factors(profile, context);
        compute_risk_score(&factors, weights)
    }

    /// Same contract as [`RiskEngine::evaluate`]; used when the caller is after
    /// the attribution breakdown.
    pub fn explain(
        &self,
        profile: &DeviceProfile,
        context: &EnvironmentContext,
        weights: Option<&FactorWeights>,
    ) -> Result<RiskScoreResult, RiskError> {
        self.evaluate(profile, context, weights)
    }

    /// Monte Carlo evaluation drawing shocks from the thread-local generator.
    pub fn simulate(
        &self,
        profile: &DeviceProfile,
        context: &EnvironmentContext,
        weights: Option<&FactorWeights>,
        config: Option<&SimulationConfig>,
    ) -> Result<SimulationResult, RiskError> {
        self.simulate_with(profile, context, weights, config, &mut rand::thread_rng())
    }

    /// Monte Carlo evaluation that is reproducible for a given seed.
    pub fn simulate_seeded(
        &self,
        profile: &DeviceProfile,
        context: &EnvironmentContext,
        weights: Option<&FactorWeights>,
        config: Option<&SimulationConfig>,
        seed: u64,
    ) -> Result<SimulationResult, RiskError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.simulate_with(profile, context, weights, config, &mut rng)
    }

    pub fn simulate_with<S: ShockSource + ?Sized>(
        &self,
        profile: &DeviceProfile,
        context: &EnvironmentContext,
        weights: Option<&FactorWeights>,
        config: Option<&SimulationConfig>,
        shocks: &mut S,
    ) -> Result<SimulationResult, RiskError> {
        let weights = weights.unwrap_or(&self.weights);
        let config = config.unwrap_or(&self.simulation);
        run_monte_carlo(profile, context, weights, config, shocks)
    }
}

/// Deterministic risk score for a device, using the built-in weights when none
/// are given.
pub fn evaluate_risk(
    profile: &DeviceProfile,
    context: &EnvironmentContext,
    weights: Option<&FactorWeights>,
) -> Result<RiskScoreResult, RiskError> {
    RiskEngine::default().evaluate(profile, context, weights)
}

/// Alias of [`evaluate_risk`] for attribution-focused callers.
pub fn explain_risk(
    profile: &DeviceProfile,
    context: &EnvironmentContext,
    weights: Option<&FactorWeights>,
) -> Result<RiskScoreResult, RiskError> {
    RiskEngine::default().explain(profile, context, weights)
}

/// Monte Carlo simulation of risk scores with default weights and a
/// 1000-path, 0.1-volatility configuration when none are given.
pub fn simulate_risk(
    profile: &DeviceProfile,
    context: &EnvironmentContext,
    weights: Option<&FactorWeights>,
    config: Option<&SimulationConfig>,
) -> Result<SimulationResult, RiskError> {
    RiskEngine::default().simulate(profile, context, weights, config)
}

pub fn simulate_risk_with<S: ShockSource + ?Sized>(
    profile: &DeviceProfile,
    context: &EnvironmentContext,
    weights: Option<&FactorWeights>,
    config: Option<&SimulationConfig>,
    shocks: &mut S,
) -> Result<SimulationResult, RiskError> {
    RiskEngine::default().simulate_with(profile, context, weights, config, shocks)
}
