use std::collections::BTreeMap;

use super::domain::{FactorKind, FactorSet, RiskError};
use super::weights::FactorWeights;

/// Percentage share of each factor in the realized weighted contribution.
///
/// Shares are re-based on the sum of actual contributions, so they add up to 100
/// whenever anything contributes and are all zero otherwise.
pub fn compute_attribution(
    factors: &FactorSet,
    weights: &FactorWeights,
) -> Result<BTreeMap<FactorKind, f64>, RiskError> {
    let normalized = weights.normalized()?;

    let contributions: BTreeMap<FactorKind, f64> = factors
        .iter()
        .map(|(kind, factor)| (*kind, normalized.get(*kind) * factor.score))
        .collect();
    let total_contribution: f64 = contributions.values().sum();

    if total_contribution <= 0.0 {
        return Ok(contributions.into_keys().map(|kind| (kind, 0.0)).collect());
    }

    Ok(contributions
        .into_iter()
        .map(|(kind, contribution)| (kind, contribution / total_contribution * 100.0))
        .collect())
}
