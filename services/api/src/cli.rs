use crate::demo::{
    run_demo, run_evaluate, run_explain, run_simulate, DemoArgs, EvaluateArgs, SimulateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use proto_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "proto-risk",
    about = "Score prototype device risk and simulate it under a shifting environment",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the deterministic 0-100 risk score for a device
    Evaluate(EvaluateArgs),
    /// Compute the risk score and rank each factor's contribution
    Explain(EvaluateArgs),
    /// Estimate the score distribution with a Monte Carlo simulation
    Simulate(SimulateArgs),
    /// Walk through the prototype camera example end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Explain(args) => run_explain(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_simulate_with_repeated_weights() {
        let cli = Cli::try_parse_from([
            "proto-risk",
            "simulate",
            "--device-value",
            "80000",
            "--ip-sensitivity",
            "0.85",
            "--novelty",
            "0.9",
            "--location",
            "0.4",
            "--transit",
            "0.7",
            "--operational",
            "0.3",
            "--personnel",
            "-0.5",
            "--weight",
            "transit=2",
            "--weight",
            "device-value=1",
            "--paths",
            "250",
            "--seed",
            "9",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Simulate(args)) => {
                assert_eq!(args.paths, Some(250));
                assert_eq!(args.seed, Some(9));
                assert_eq!(args.device.personnel, -0.5);
                assert_eq!(args.device.weights.len(), 2);
            }
            other => panic!("expected simulate command, got {other:?}"),
        }
    }

    #[test]
    fn profile_flags_accept_negative_values() {
        let cli = Cli::try_parse_from([
            "proto-risk",
            "evaluate",
            "--device-value",
            "-5000",
            "--ip-sensitivity",
            "-0.1",
            "--novelty",
            "-0.2",
            "--location",
            "0.4",
            "--transit",
            "0.7",
            "--operational",
            "0.3",
            "--personnel",
            "0.5",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.device.device_value, -5000.0);
                assert_eq!(args.device.ip_sensitivity, -0.1);
                assert_eq!(args.device.novelty, -0.2);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }
}
