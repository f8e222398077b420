use super::common::*;
use crate::risk::domain::{FactorKind, RiskError};
use crate::risk::weights::{normalize_weights, FactorWeights};

#[test]
fn default_weights_match_built_in_mapping() {
    let weights = FactorWeights::default();

    assert_eq!(weights.len(), 5);
    assert_close(weights.get(FactorKind::DeviceValue), 0.3);
    assert_close(weights.get(FactorKind::Location), 0.2);
    assert_close(weights.get(FactorKind::Transit), 0.2);
    assert_close(weights.get(FactorKind::Operational), 0.15);
    assert_close(weights.get(FactorKind::Personnel), 0.15);
    assert_close(weights.total(), 1.0);
}

#[test]
fn normalization_rescales_to_unit_sum() {
    let weights = FactorWeights::new()
        .with(FactorKind::DeviceValue, 3.0)
        .with(FactorKind::Location, 1.0)
        .with(FactorKind::Personnel, 4.0);

    let normalized = normalize_weights(&weights).expect("positive total");

    assert_close(normalized.total(), 1.0);
    assert_close(normalized.get(FactorKind::DeviceValue), 0.375);
    assert_close(normalized.get(FactorKind::Personnel), 0.5);
    assert_eq!(normalized.get(FactorKind::Transit), 0.0);
    assert_eq!(normalized.len(), 3);
}

#[test]
fn normalization_rejects_non_positive_totals() {
    let all_zero: FactorWeights = FactorKind::ALL.into_iter().map(|kind| (kind, 0.0)).collect();
    let net_negative = FactorWeights::new()
        .with(FactorKind::Location, 0.5)
        .with(FactorKind::Transit, -1.0);

    for weights in [FactorWeights::new(), all_zero, net_negative] {
        match weights.normalized() {
            Err(RiskError::InvalidWeights { total }) => assert!(total <= 0.0),
            other => panic!("expected invalid weights, got {other:?}"),
        }
    }
}

#[test]
fn normalization_rejects_nan_total() {
    let weights = FactorWeights::new().with(FactorKind::Location, f64::NAN);
    assert!(matches!(
        weights.normalized(),
        Err(RiskError::InvalidWeights { .. })
    ));
}

#[test]
fn weights_deserialize_from_factor_labels() {
    let weights: FactorWeights =
        serde_json::from_str(r#"{"device_value": 2.0, "transit": 1.0}"#).expect("valid weights");
    assert_eq!(weights.get(FactorKind::DeviceValue), 2.0);
    assert_eq!(weights.get(FactorKind::Location), 0.0);

    let unknown = serde_json::from_str::<FactorWeights>(r#"{"weather": 1.0}"#);
    assert!(unknown.is_err());
}
