use std::collections::BTreeMap;

use super::attribution::compute_attribution;
use super::domain::{FactorKind, FactorSet, RiskError, RiskScoreResult};
use super::weights::FactorWeights;

/// Weighted sum of factor scores in `[0, 1]`. Expects already normalized weights.
pub fn weighted_score(factors: &FactorSet, normalized: &FactorWeights) -> f64 {
    factors
        .iter()
        .map(|(kind, factor)| normalized.get(*kind) * factor.score)
        .sum()
}

/// Compute the 0-100 risk score, raw factor scores, and attribution.
pub fn compute_risk_score(
    factors: &FactorSet,
    weights: &FactorWeights,
) -> Result<RiskScoreResult, RiskError> {
    let normalized = weights.normalized()?;
    let score_0_1 = weighted_score(factors, &normalized);

    let factor_scores: BTreeMap<FactorKind, f64> = factors
        .iter()
        .map(|(kind, factor)| (*kind, factor.score))
        .collect();

    let attribution_pct = compute_attribution(factors, weights)?;

    Ok(RiskScoreResult {
        score_0_100: score_0_1 * 100.0,
        factor_scores,
        attribution_pct,
    })
}
