use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use super::domain::{DeviceProfile, EnvironmentContext, RiskError, SimulationConfig, SimulationResult};
use super::factors::{clamp01, compute_all_factors};
use super::scoring::weighted_score;
use super::weights::FactorWeights;

/// Source of zero-mean Gaussian shocks used to perturb the environment.
///
/// Every [`rand::Rng`] is a shock source, so seeded generators such as
/// `StdRng::seed_from_u64` give reproducible runs.
pub trait ShockSource {
    fn gaussian(&mut self, std_dev: f64) -> f64;
}

impl<R: Rng + ?Sized> ShockSource for R {
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        let z: f64 = self.sample(StandardNormal);
        z * std_dev
    }
}

/// Add a Gaussian shock to `value` and clip the result into `[0, 1]`.
pub fn perturb<S: ShockSource + ?Sized>(value: f64, volatility: f64, shocks: &mut S) -> f64 {
    clamp01(value + shocks.gaussian(volatility))
}

/// Nearest-rank index of the 95th percentile in an ascending sample of `n_paths`.
pub fn p95_index(n_paths: usize) -> usize {
    if n_paths == 0 {
        return 0;
    }
    let rank = (0.95 * n_paths as f64).floor() as usize;
    rank.saturating_sub(1).min(n_paths - 1)
}

/// Mean and nearest-rank p95 of the path scores. Expects at least one score.
pub fn summarize(path_scores: Vec<f64>) -> SimulationResult {
    let mut sorted = path_scores.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean_score = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let p95_score = sorted
        .get(p95_index(sorted.len()))
        .copied()
        .unwrap_or(mean_score);

    SimulationResult {
        mean_score,
        p95_score,
        path_scores,
    }
}

fn perturb_context<S: ShockSource + ?Sized>(
    base: &EnvironmentContext,
    config: &SimulationConfig,
    shocks: &mut S,
) -> EnvironmentContext {
    EnvironmentContext {
        location_risk: perturb(base.location_risk, config.location_volatility, shocks),
        transit_risk: perturb(base.transit_risk, config.transit_volatility, shocks),
        operational_risk: perturb(base.operational_risk, config.operational_volatility, shocks),
        personnel_risk: perturb(base.personnel_risk, config.personnel_volatility, shocks),
    }
}

/// Monte Carlo simulation of risk scores under perturbed environment contexts.
///
/// Each path perturbs the four context dimensions independently, recomputes all
/// factors against the fixed profile, and records the 0-100 score. Weights and
/// configuration are validated once before any path runs.
pub fn run_monte_carlo<S: ShockSource + ?Sized>(
    profile: &DeviceProfile,
    base_ctx: &EnvironmentContext,
    weights: &FactorWeights,
    config: &SimulationConfig,
    shocks: &mut S,
) -> Result<SimulationResult, RiskError> {
    config.validate()?;
    let normalized = weights.normalized()?;

    let mut path_scores = Vec::with_capacity(config.n_paths);
    for _ in 0..config.n_paths {
        let ctx = perturb_context(base_ctx, config, shocks);
        let factors = compute_all_factors(profile, &ctx);
        path_scores.push(weighted_score(&factors, &normalized) * 100.0);
    }

    let result = summarize(path_scores);
    debug!(
        device_id = %profile.device_id,
        n_paths = config.n_paths,
        mean = result.mean_score,
        p95 = result.p95_score,
        "monte carlo simulation complete"
    );

    Ok(result)
}
