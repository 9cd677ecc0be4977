//! Integration tests for Slice 3
//!
//! Tests emergency check-in, backend payloads and configuration

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use pulse_liveness::config::PulseConfig;
use pulse_liveness::core::{ScriptedPlatform, VerificationOrchestrator};
use pulse_liveness::types::{
    CheckinReceipt, InvocationTag, ReasonCode, SubmissionReceipt, VaultStatus, VerificationResult,
};
use pulse_liveness::LivenessError;

fn now() -> DateTime<Utc> {
    "2026-06-15T12:00:00Z".parse().unwrap()
}

#[tokio::test]
async fn test_emergency_relabels_success_only() {
    let normal = VerificationOrchestrator::new(ScriptedPlatform::approving()).with_jitter_seed(7);
    let emergency = VerificationOrchestrator::new(ScriptedPlatform::approving()).with_jitter_seed(7);

    let n = normal.run_verification_at(None, now()).await.unwrap();
    let e = emergency.run_emergency_verification_at(None, now()).await.unwrap();

    assert_eq!(e.invocation_tag, InvocationTag::EmergencyCheckin);
    assert_eq!(e.transport_score, n.transport_score);
    assert_eq!(e.raw_confidence, n.raw_confidence);
    assert_eq!(e.features, n.features);
    assert_eq!(e.reason, n.reason);
}

#[tokio::test]
async fn test_emergency_failures_keep_failure_tag() {
    let orch = VerificationOrchestrator::new(ScriptedPlatform::unavailable());
    let result = orch.run_emergency_verification_at(None, now()).await.unwrap();
    assert_eq!(result.invocation_tag, InvocationTag::BiometricUnavailable);

    let orch = VerificationOrchestrator::new(ScriptedPlatform::cancelling());
    let result = orch.run_emergency_verification_at(None, now()).await.unwrap();
    assert_eq!(result.invocation_tag, InvocationTag::BiometricFailed);
    assert!(result.submission_payload().is_none());
}

#[tokio::test]
async fn test_payload_carries_score_and_source() {
    let orch = VerificationOrchestrator::new(ScriptedPlatform::approving()).with_jitter_seed(21);
    let result = orch.run_emergency_verification_at(None, now()).await.unwrap();

    let payload = result.submission_payload().unwrap();
    assert_eq!(payload.transport_score, result.transport_score);
    assert_eq!(payload.source, "emergency_checkin");

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["perceptronOutput"], result.transport_score);
    assert_eq!(json["source"], "emergency_checkin");
}

#[tokio::test]
async fn test_result_json_round_trip() {
    let orch = VerificationOrchestrator::new(ScriptedPlatform::approving()).with_jitter_seed(4);
    let result = orch.run_verification_at(None, now()).await.unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"invocationTag\":\"mobile_biometric\""));

    let back: VerificationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.transport_score, result.transport_score);
    assert_eq!(back.invocation_tag, result.invocation_tag);
    assert_eq!(back.evaluated_at, result.evaluated_at);
    assert_eq!(back.feature_values().len(), 10);
    assert!((back.raw_confidence - result.raw_confidence).abs() < 1e-12);
}

#[test]
fn test_failed_result_sends_empty_features() {
    let result = VerificationResult::failure(
        InvocationTag::BiometricFailed,
        ReasonCode::V102_BIOMETRIC_REJECTED,
        "Biometric authentication was cancelled or failed",
        now(),
    );
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["features"], serde_json::json!([]));
    assert_eq!(json["transportScore"], 0);
    assert_eq!(json["failureReason"], "Biometric authentication was cancelled or failed");
}

#[test]
fn test_emergency_eligibility() {
    for status in [VaultStatus::Alert, VaultStatus::GracePeriod] {
        assert!(status.allows_emergency_checkin());
    }
    for status in [VaultStatus::Active, VaultStatus::Triggered, VaultStatus::Distributed] {
        assert!(!status.allows_emergency_checkin());
    }
    assert_eq!("grace-period".parse::<VaultStatus>().unwrap(), VaultStatus::GracePeriod);
}

#[test]
fn test_receipts() {
    let receipt: SubmissionReceipt = serde_json::from_str(
        r#"{"score": 7412, "txHash": "0x9a1f", "timestamp": "2026-06-15T12:00:03Z"}"#,
    )
    .unwrap();
    assert_eq!(receipt.score, 7412);
    assert_eq!(receipt.transaction_reference(), Some("0x9a1f"));

    let checkin: CheckinReceipt = serde_json::from_str(
        r#"{"score": 7412, "txHash": null, "vaultStatus": "ACTIVE"}"#,
    )
    .unwrap();
    assert_eq!(checkin.vault_status, VaultStatus::Active);
    assert_eq!(checkin.transaction_reference(), None);
}

#[test]
fn test_config_rejects_bad_weights() {
    let err = PulseConfig::from_lookup(|key| match key {
        "PULSE_WEIGHTS" => Some("1,2,3".to_string()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err, LivenessError::WeightCount { expected: 10, actual: 3 });
}
