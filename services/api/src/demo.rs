use crate::infra::{parse_weight, weights_from_pairs};
use clap::Args;
use proto_risk::config::AppConfig;
use proto_risk::error::AppError;
use proto_risk::risk::{
    compute_all_factors, DeviceProfile, EnvironmentContext, FactorKind, FactorWeights,
    RiskEngine, RiskScoreResult, SimulationConfig, SimulationResult,
};
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct DeviceArgs {
    /// Identifier printed alongside the results
    #[arg(long, default_value = "prototype")]
    pub(crate) device_id: String,
    /// Monetary or relative device value (100000 and above counts as very high)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) device_value: f64,
    /// IP sensitivity in [0, 1]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) ip_sensitivity: f64,
    /// Technology novelty in [0, 1]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) novelty: f64,
    /// Location risk in [0, 1]; out-of-range values are clamped
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) location: f64,
    /// Transit risk in [0, 1]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) transit: f64,
    /// Operational risk in [0, 1]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) operational: f64,
    /// Personnel risk in [0, 1]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) personnel: f64,
    /// Raw factor weight as factor=value; repeat per factor (defaults to built-in weights)
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<(FactorKind, f64)>,
}

impl DeviceArgs {
    fn profile(&self) -> DeviceProfile {
        DeviceProfile {
            device_id: self.device_id.clone(),
            device_value: self.device_value,
            ip_sensitivity: self.ip_sensitivity,
            novelty: self.novelty,
        }
    }

    fn context(&self) -> EnvironmentContext {
        EnvironmentContext {
            location_risk: self.location,
            transit_risk: self.transit,
            operational_risk: self.operational,
            personnel_risk: self.personnel,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    #[command(flatten)]
    pub(crate) device: DeviceArgs,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    #[command(flatten)]
    pub(crate) device: DeviceArgs,
    /// Number of simulation paths (defaults to RISK_SIM_PATHS or 1000)
    #[arg(long)]
    pub(crate) paths: Option<usize>,
    /// Standard deviation of location shocks
    #[arg(long)]
    pub(crate) location_volatility: Option<f64>,
    /// Standard deviation of transit shocks
    #[arg(long)]
    pub(crate) transit_volatility: Option<f64>,
    /// Standard deviation of operational shocks
    #[arg(long)]
    pub(crate) operational_volatility: Option<f64>,
    /// Standard deviation of personnel shocks
    #[arg(long)]
    pub(crate) personnel_volatility: Option<f64>,
    /// Seed for a reproducible run (defaults to RISK_SIM_SEED when set)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the summary and every path score as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl SimulateArgs {
    fn config(&self, defaults: SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            n_paths: self.paths.unwrap_or(defaults.n_paths),
            location_volatility: self
                .location_volatility
                .unwrap_or(defaults.location_volatility),
            transit_volatility: self
                .transit_volatility
                .unwrap_or(defaults.transit_volatility),
            operational_volatility: self
                .operational_volatility
                .unwrap_or(defaults.operational_volatility),
            personnel_volatility: self
                .personnel_volatility
                .unwrap_or(defaults.personnel_volatility),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for the simulation portion of the demo
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Skip the Monte Carlo portion of the demo
    #[arg(long)]
    pub(crate) skip_simulation: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let weights = weights_from_pairs(&args.device.weights);
    let result = RiskEngine::default().evaluate(
        &args.device.profile(),
        &args.device.context(),
        weights.as_ref(),
    )?;

    if args.json {
        return print_json(&result);
    }
    render_score(&args.device.profile(), &result, false);
    Ok(())
}

pub(crate) fn run_explain(args: EvaluateArgs) -> Result<(), AppError> {
    let profile = args.device.profile();
    let context = args.device.context();
    let weights = weights_from_pairs(&args.device.weights);
    let result = RiskEngine::default().explain(&profile, &context, weights.as_ref())?;

    if args.json {
        return print_json(&result);
    }
    render_score(&profile, &result, true);
    render_factor_details(&profile, &context);
    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let settings = AppConfig::load()?.simulation;
    let config = args.config(settings.simulation_config());
    let profile = args.device.profile();
    let weights = weights_from_pairs(&args.device.weights);
    let engine = RiskEngine::default();

    let context = args.device.context();
    let result = match args.seed.or(settings.seed) {
        Some(seed) => {
            engine.simulate_seeded(&profile, &context, weights.as_ref(), Some(&config), seed)?
        }
        None => engine.simulate(&profile, &context, weights.as_ref(), Some(&config))?,
    };

    if args.json {
        return print_json(&result);
    }
    render_simulation(&config, &result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let profile = DeviceProfile {
        device_id: "prototype-camera-v3".to_string(),
        device_value: 80_000.0,
        ip_sensitivity: 0.85,
        novelty: 0.9,
    };
    let context = EnvironmentContext {
        location_risk: 0.4,
        transit_risk: 0.7,
        operational_risk: 0.3,
        personnel_risk: 0.5,
    };
    let engine = RiskEngine::new(FactorWeights::default());

    println!("Prototype device risk demo");
    let result = engine.explain(&profile, &context, None)?;
    render_score(&profile, &result, true);
    render_factor_details(&profile, &context);

    if args.skip_simulation {
        return Ok(());
    }

    let config = SimulationConfig {
        n_paths: 2000,
        location_volatility: 0.08,
        transit_volatility: 0.12,
        operational_volatility: 0.08,
        personnel_volatility: 0.1,
    };
    let simulation = match args.seed {
        Some(seed) => engine.simulate_seeded(&profile, &context, None, Some(&config), seed)?,
        None => engine.simulate(&profile, &context, None, Some(&config))?,
    };
    println!();
    render_simulation(&config, &simulation);

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_score(profile: &DeviceProfile, result: &RiskScoreResult, ranked: bool) {
    println!("Deterministic risk for {}", profile.device_id);
    println!("Score: {:.2} / 100", result.score_0_100);

    println!("\nFactor scores");
    for (kind, score) in &result.factor_scores {
        println!("- {}: {:.3}", kind, score);
    }

    if ranked {
        println!("\nAttribution (largest first)");
        for (kind, pct) in result.ranked_attribution() {
            println!("- {}: {:.1}%", kind, pct);
        }
    } else {
        println!("\nAttribution");
        for (kind, pct) in &result.attribution_pct {
            println!("- {}: {:.1}%", kind, pct);
        }
    }
}

fn render_factor_details(profile: &DeviceProfile, context: &EnvironmentContext) {
    println!("\nFactor inputs");
    for factor in compute_all_factors(profile, context).values() {
        let details = factor
            .details
            .iter()
            .map(|(key, value)| format!("{key}={value:.3}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("- {}: {}", factor.kind, details);
    }
}

pub(crate) fn render_simulation(config: &SimulationConfig, result: &SimulationResult) {
    println!("Monte Carlo simulation");
    println!(
        "Volatility: location {:.2}, transit {:.2}, operational {:.2}, personnel {:.2}",
        config.location_volatility,
        config.transit_volatility,
        config.operational_volatility,
        config.personnel_volatility
    );
    println!("Mean score: {:.2}", result.mean_score);
    println!("95th percentile: {:.2}", result.p95_score);
    println!("Paths: {}", result.path_scores.len());
}
