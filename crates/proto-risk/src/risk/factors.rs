use std::collections::BTreeMap;

use super::domain::{DeviceProfile, EnvironmentContext, FactorKind, FactorSet, RiskFactorResult};

/// Device value treated as "very high"; scaled value saturates at this point.
pub const DEVICE_VALUE_CEILING: f64 = 100_000.0;

const SENSITIVITY_WEIGHT: f64 = 0.4;
const NOVELTY_WEIGHT: f64 = 0.4;
const VALUE_WEIGHT: f64 = 0.2;

/// Clamp into `[0, 1]`. NaN maps to 0.
pub fn clamp01(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Combine value, IP sensitivity, and novelty into the device value factor.
pub fn compute_device_value_factor(profile: &DeviceProfile) -> RiskFactorResult {
    let base = SENSITIVITY_WEIGHT * profile.ip_sensitivity + NOVELTY_WEIGHT * profile.novelty;
    // only capped from above; negative device values are the caller's problem
    let value_scaled = (profile.device_value / DEVICE_VALUE_CEILING).min(1.0);

    let mut details = BTreeMap::new();
    details.insert("base".to_string(), base);
    details.insert("value_scaled".to_string(), value_scaled);

    RiskFactorResult {
        kind: FactorKind::DeviceValue,
        score: clamp01(base + VALUE_WEIGHT * value_scaled),
        details,
    }
}

fn context_factor(kind: FactorKind, ctx: &EnvironmentContext) -> RiskFactorResult {
    // DeviceValue never routes here
    let raw = ctx.risk_for(kind).unwrap_or(0.0);
    let mut details = BTreeMap::new();
    details.insert(format!("{}_risk", kind.label()), raw);

    RiskFactorResult {
        kind,
        score: clamp01(raw),
        details,
    }
}

pub fn compute_location_factor(ctx: &EnvironmentContext) -> RiskFactorResult {
    context_factor(FactorKind::Location, ctx)
}

pub fn compute_transit_factor(ctx: &EnvironmentContext) -> RiskFactorResult {
    context_factor(FactorKind::Transit, ctx)
}

pub fn compute_operational_factor(ctx: &EnvironmentContext) -> RiskFactorResult {
    context_factor(FactorKind::Operational, ctx)
}

pub fn compute_personnel_factor(ctx: &EnvironmentContext) -> RiskFactorResult {
    context_factor(FactorKind::Personnel, ctx)
}

/// Compute every factor for a device in the given context.
pub fn compute_all_factors(profile: &DeviceProfile, ctx: &EnvironmentContext) -> FactorSet {
    FactorKind::ALL
        .into_iter()
        .map(|kind| {
            let result = match kind {
                FactorKind::DeviceValue => compute_device_value_factor(profile),
                FactorKind::Location => compute_location_factor(ctx),
                FactorKind::Transit => compute_transit_factor(ctx),
                FactorKind::Operational => compute_operational_factor(ctx),
                FactorKind::Personnel => compute_personnel_factor(ctx),
            };
            (kind, result)
        })
        .collect()
}
