use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_risk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use proto_risk::config::AppConfig;
use proto_risk::error::AppError;
use proto_risk::risk::{FactorWeights, RiskEngine};
use proto_risk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = Arc::new(
        RiskEngine::new(FactorWeights::default())
            .with_simulation(config.simulation.simulation_config()),
    );

    let app = with_risk_routes(engine, config.simulation.seed)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_paths = config.simulation.default_paths,
        seeded = config.simulation.seed.is_some(),
        "device risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
