use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FactorKind, RiskError};

/// Sparse mapping from factor to raw, non-negative weight.
///
/// Factors without an entry weigh zero. The default mapping already sums to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorWeights(BTreeMap<FactorKind, f64>);

impl Default for FactorWeights {
    fn default() -> Self {
        Self::new()
            .with(FactorKind::DeviceValue, 0.3)
            .with(FactorKind::Location, 0.2)
            .with(FactorKind::Transit, 0.2)
            .with(FactorKind::Operational, 0.15)
            .with(FactorKind::Personnel, 0.15)
    }
}

impl FactorWeights {
    /// Empty mapping. Must be populated before it can be normalized.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, kind: FactorKind, weight: f64) -> Self {
        self.insert(kind, weight);
        self
    }

    pub fn insert(&mut self, kind: FactorKind, weight: f64) -> Option<f64> {
        self.0.insert(kind, weight)
    }

    pub fn get(&self, kind: FactorKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactorKind, f64)> + '_ {
        self.0.iter().map(|(kind, weight)| (*kind, *weight))
    }

    pub fn normalized(&self) -> Result<Self, RiskError> {
        normalize_weights(self)
    }
}

impl FromIterator<(FactorKind, f64)> for FactorWeights {
    fn from_iter<I: IntoIterator<Item = (FactorKind, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rescale raw weights so they sum to 1.0.
///
/// Fails when the total is not strictly positive, which covers empty, all-zero,
/// net-negative and NaN mappings.
pub fn normalize_weights(weights: &FactorWeights) -> Result<FactorWeights, RiskError> {
    let total = weights.total();
    if !(total > 0.0) {
        return Err(RiskError::InvalidWeights { total });
    }

    Ok(weights
        .iter()
        .map(|(kind, weight)| (kind, weight / total))
        .collect())
}
