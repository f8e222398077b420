use super::common::*;
use crate::risk::attribution::compute_attribution;
use crate::risk::domain::{FactorKind, RiskError};
use crate::risk::factors::compute_all_factors;
use crate::risk::weights::FactorWeights;
use crate::risk::{compute_risk_score, evaluate_risk, explain_risk, weighted_score};

#[test]
fn quickstart_scenario_scores_59_8() {
    let result = evaluate_risk(&camera_profile(), &field_context(), None).expect("default weights");

    assert_close(result.score_0_100, 59.8);
    assert_close(result.factor_scores[&FactorKind::DeviceValue], 0.86);
    assert_close(result.factor_scores[&FactorKind::Location], 0.4);
    assert_close(result.factor_scores[&FactorKind::Transit], 0.7);
    assert_close(result.factor_scores[&FactorKind::Operational], 0.3);
    assert_close(result.factor_scores[&FactorKind::Personnel], 0.5);
}

#[test]
fn attribution_shares_follow_weighted_contributions() {
    let result = evaluate_risk(&camera_profile(), &field_context(), None).expect("default weights");

    let total: f64 = result.attribution_pct.values().sum();
    assert_close(total, 100.0);
    assert_close(
        result.attribution_pct[&FactorKind::DeviceValue],
        0.258 / 0.598 * 100.0,
    );
    assert_close(
        result.attribution_pct[&FactorKind::Operational],
        0.045 / 0.598 * 100.0,
    );

    let ranked = result.ranked_attribution();
    assert_eq!(ranked[0].0, FactorKind::DeviceValue);
    assert_eq!(ranked[1].0, FactorKind::Transit);
    assert_eq!(ranked.last().map(|entry| entry.0), Some(FactorKind::Operational));
}

#[test]
fn explain_matches_evaluate() {
    let weights = FactorWeights::new()
        .with(FactorKind::Transit, 2.0)
        .with(FactorKind::Location, 1.0);

    let evaluated = evaluate_risk(&camera_profile(), &field_context(), Some(&weights))
        .expect("valid weights");
    let explained = explain_risk(&camera_profile(), &field_context(), Some(&weights))
        .expect("valid weights");

    assert_eq!(evaluated, explained);
}

#[test]
fn missing_weights_contribute_nothing() {
    let weights = FactorWeights::new()
        .with(FactorKind::Transit, 2.0)
        .with(FactorKind::Location, 2.0);

    let result = evaluate_risk(&camera_profile(), &field_context(), Some(&weights))
        .expect("valid weights");

    assert_close(result.score_0_100, 100.0 * (0.5 * 0.7 + 0.5 * 0.4));
    assert_eq!(result.factor_scores.len(), 5);
    assert_eq!(result.attribution_pct[&FactorKind::DeviceValue], 0.0);
    assert_close(result.attribution_pct[&FactorKind::Transit], 0.7 / 1.1 * 100.0);
}

#[test]
fn attribution_rebases_on_realized_contribution() {
    let mut ctx = field_context();
    ctx.location_risk = 0.0;

    let factors = compute_all_factors(&camera_profile(), &ctx);
    let weights = FactorWeights::new()
        .with(FactorKind::Location, 1.0)
        .with(FactorKind::Transit, 1.0);

    let attribution = compute_attribution(&factors, &weights).expect("valid weights");
    let score = compute_risk_score(&factors, &weights).expect("valid weights");

    // transit holds half the weight but all of the realized contribution
    assert_close(attribution[&FactorKind::Transit], 100.0);
    assert_close(score.score_0_100, 35.0);
}

#[test]
fn zero_contribution_yields_zero_attribution() {
    let result = evaluate_risk(&quiet_profile(), &quiet_context(), None).expect("default weights");

    assert_eq!(result.score_0_100, 0.0);
    assert_eq!(result.attribution_pct.len(), 5);
    assert!(result.attribution_pct.values().all(|pct| *pct == 0.0));
}

#[test]
fn zero_weights_fail_in_scoring_and_attribution() {
    let weights: FactorWeights = FactorKind::ALL.into_iter().map(|kind| (kind, 0.0)).collect();
    let factors = compute_all_factors(&camera_profile(), &field_context());

    assert!(matches!(
        evaluate_risk(&camera_profile(), &field_context(), Some(&weights)),
        Err(RiskError::InvalidWeights { .. })
    ));
    assert!(matches!(
        compute_attribution(&factors, &weights),
        Err(RiskError::InvalidWeights { .. })
    ));
}

#[test]
fn scores_stay_in_range_for_extreme_inputs() {
    let mut profile = camera_profile();
    profile.device_value = 1e12;
    profile.ip_sensitivity = 7.0;
    let mut ctx = field_context();
    ctx.location_risk = 42.0;
    ctx.personnel_risk = -10.0;

    let factors = compute_all_factors(&profile, &ctx);
    let normalized = FactorWeights::default().normalized().expect("default weights");
    let raw = weighted_score(&factors, &normalized);
    let result = evaluate_risk(&profile, &ctx, None).expect("default weights");

    assert!((0.0..=1.0).contains(&raw));
    assert!((0.0..=100.0).contains(&result.score_0_100));
    assert_close(result.score_0_100, raw * 100.0);
}
