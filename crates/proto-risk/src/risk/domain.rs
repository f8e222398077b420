use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Basic description of a prototype device under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub device_id: String,
    /// Monetary or relative value; 100k and above counts as "very high".
    pub device_value: f64,
    pub ip_sensitivity: f64,
    pub novelty: f64,
}

/// Context the device is currently operating in. Each dimension is read as a
/// risk in `[0, 1]` where 1 is the highest risk; values outside the range are
/// clamped during scoring rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    pub location_risk: f64,
    pub transit_risk: f64,
    pub operational_risk: f64,
    pub personnel_risk: f64,
}

impl EnvironmentContext {
    /// Raw context value backing a contextual factor. `DeviceValue` is derived
    /// from the profile, not the context.
    pub fn risk_for(&self, kind: FactorKind) -> Option<f64> {
        match kind {
            FactorKind::DeviceValue => None,
            FactorKind::Location => Some(self.location_risk),
            FactorKind::Transit => Some(self.transit_risk),
            FactorKind::Operational => Some(self.operational_risk),
            FactorKind::Personnel => Some(self.personnel_risk),
        }
    }
}

/// The closed set of factors contributing to a device risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    DeviceValue,
    Location,
    Transit,
    Operational,
    Personnel,
}

impl FactorKind {
    pub const ALL: [FactorKind; 5] = [
        FactorKind::DeviceValue,
        FactorKind::Location,
        FactorKind::Transit,
        FactorKind::Operational,
        FactorKind::Personnel,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::DeviceValue => "device_value",
            FactorKind::Location => "location",
            FactorKind::Transit => "transit",
            FactorKind::Operational => "operational",
            FactorKind::Personnel => "personnel",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk factor '{0}' (expected one of device_value, location, transit, operational, personnel)")]
pub struct UnknownFactorKind(pub String);

impl FromStr for FactorKind {
    type Err = UnknownFactorKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        FactorKind::ALL
            .into_iter()
            .find(|kind| kind.label() == normalized)
            .ok_or_else(|| UnknownFactorKind(raw.to_string()))
    }
}

/// Result of a single factor computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorResult {
    pub kind: FactorKind,
    /// Always within `[0, 1]`.
    pub score: f64,
    /// Diagnostic sub-values; informational only.
    pub details: BTreeMap<String, f64>,
}

/// Every factor computed for one device in one context.
pub type FactorSet = BTreeMap<FactorKind, RiskFactorResult>;

/// Final risk score on a 0-100 scale with the per-factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub score_0_100: f64,
    pub factor_scores: BTreeMap<FactorKind, f64>,
    pub attribution_pct: BTreeMap<FactorKind, f64>,
}

impl RiskScoreResult {
    /// Attribution entries ordered from the largest contributor down.
    pub fn ranked_attribution(&self) -> Vec<(FactorKind, f64)> {
        let mut ranked: Vec<(FactorKind, f64)> = self
            .attribution_pct
            .iter()
            .map(|(kind, pct)| (*kind, *pct))
            .collect();
        // stable sort keeps canonical order for ties
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

const DEFAULT_PATHS: usize = 1000;
const DEFAULT_VOLATILITY: f64 = 0.1;

/// Upper bound on paths accepted for a single simulation.
pub const MAX_PATHS: usize = 1_000_000;

/// Controls Monte Carlo simulation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_paths: usize,
    pub location_volatility: f64,
    pub transit_volatility: f64,
    pub operational_volatility: f64,
    pub personnel_volatility: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            location_volatility: DEFAULT_VOLATILITY,
            transit_volatility: DEFAULT_VOLATILITY,
            operational_volatility: DEFAULT_VOLATILITY,
            personnel_volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl SimulationConfig {
    /// Same volatility on every context dimension.
    pub fn uniform(n_paths: usize, volatility: f64) -> Self {
        Self {
            n_paths,
            location_volatility: volatility,
            transit_volatility: volatility,
            operational_volatility: volatility,
            personnel_volatility: volatility,
        }
    }

    pub fn volatility_for(&self, kind: FactorKind) -> Option<f64> {
        match kind {
            FactorKind::DeviceValue => None,
            FactorKind::Location => Some(self.location_volatility),
            FactorKind::Transit => Some(self.transit_volatility),
            FactorKind::Operational => Some(self.operational_volatility),
            FactorKind::Personnel => Some(self.personnel_volatility),
        }
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        if self.n_paths == 0 {
            return Err(RiskError::InvalidPathCount);
        }
        if self.n_paths > MAX_PATHS {
            return Err(RiskError::TooManyPaths {
                requested: self.n_paths,
                max: MAX_PATHS,
            });
        }

        for kind in FactorKind::ALL {
            if let Some(value) = self.volatility_for(kind) {
                if !value.is_finite() || value < 0.0 {
                    return Err(RiskError::InvalidVolatility {
                        factor: kind,
                        value,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Summary of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub mean_score: f64,
    pub p95_score: f64,
    /// Per-path scores in execution order, not sorted.
    pub path_scores: Vec<f64>,
}

/// Errors raised while scoring or simulating.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    #[error("weight sum must be positive (found {total})")]
    InvalidWeights { total: f64 },
    #[error("simulation requires at least one path")]
    InvalidPathCount,
    #[error("simulation path count {requested} exceeds the limit of {max}")]
    TooManyPaths { requested: usize, max: usize },
    #[error("{factor} volatility must be a finite, non-negative number (found {value})")]
    InvalidVolatility { factor: FactorKind, value: f64 },
}
