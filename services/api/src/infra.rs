use metrics_exporter_prometheus::PrometheusHandle;
use proto_risk::risk::{FactorKind, FactorWeights};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parse a `factor=value` weight flag.
pub(crate) fn parse_weight(raw: &str) -> Result<(FactorKind, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected factor=value, got '{raw}'"))?;

    let kind = name.parse::<FactorKind>().map_err(|err| err.to_string())?;
    let weight = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse weight '{value}' for {kind} ({err})"))?;

    Ok((kind, weight))
}

/// Weight mapping from CLI pairs; `None` when no weights were given so the
/// built-in defaults apply.
pub(crate) fn weights_from_pairs(pairs: &[(FactorKind, f64)]) -> Option<FactorWeights> {
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.iter().copied().collect())
    }
}
