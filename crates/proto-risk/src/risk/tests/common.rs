use std::collections::VecDeque;

use axum::response::Response;
use serde_json::Value;

use crate::risk::domain::{DeviceProfile, EnvironmentContext};
use crate::risk::simulator::ShockSource;

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn camera_profile() -> DeviceProfile {
    DeviceProfile {
        device_id: "prototype-camera-v3".to_string(),
        device_value: 80_000.0,
        ip_sensitivity: 0.85,
        novelty: 0.9,
    }
}

pub(super) fn field_context() -> EnvironmentContext {
    EnvironmentContext {
        location_risk: 0.4,
        transit_risk: 0.7,
        operational_risk: 0.3,
        personnel_risk: 0.5,
    }
}

pub(super) fn quiet_profile() -> DeviceProfile {
    DeviceProfile {
        device_id: "bench-sample".to_string(),
        device_value: 0.0,
        ip_sensitivity: 0.0,
        novelty: 0.0,
    }
}

pub(super) fn quiet_context() -> EnvironmentContext {
    EnvironmentContext {
        location_risk: 0.0,
        transit_risk: 0.0,
        operational_risk: 0.0,
        personnel_risk: 0.0,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Replays a fixed list of standard-normal draws, scaled by the requested spread.
pub(super) struct ScriptedShocks {
    draws: VecDeque<f64>,
    pub(super) requested: Vec<f64>,
}

impl ScriptedShocks {
    pub(super) fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            requested: Vec::new(),
        }
    }
}

impl ShockSource for ScriptedShocks {
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        self.requested.push(std_dev);
        self.draws.pop_front().unwrap_or(0.0) * std_dev
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
