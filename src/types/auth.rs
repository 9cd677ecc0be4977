//! Biometric capability and authentication outcome types
//!
//! Only pass/fail and a timestamp leave the platform layer.
//! No raw biometric data is ever carried here.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::ReasonCode;

/// Kind of sensor the platform reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiometryKind {
    TouchId,
    FaceId,
    Biometrics,
}

impl std::fmt::Display for BiometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BiometryKind::TouchId => "TouchID",
            BiometryKind::FaceId => "FaceID",
            BiometryKind::Biometrics => "Biometrics",
        };
        write!(f, "{}", name)
    }
}

/// Result of a capability check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricAvailability {
    pub available: bool,
    pub kind: Option<BiometryKind>,
}

impl BiometricAvailability {
    pub fn available(kind: BiometryKind) -> Self {
        Self { available: true, kind: Some(kind) }
    }

    pub fn unavailable() -> Self {
        Self { available: false, kind: None }
    }
}

/// Outcome of one biometric prompt. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationOutcome {
    /// Did the user pass the prompt
    pub succeeded: bool,
    /// When the prompt resolved
    pub occurred_at: DateTime<Utc>,
    /// Human-readable reason, only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Reason code
    pub reason: ReasonCode,
}

impl AuthenticationOutcome {
    /// Create success outcome
    pub fn success(occurred_at: DateTime<Utc>) -> Self {
        Self {
            succeeded: true,
            occurred_at,
            failure_reason: None,
            reason: ReasonCode::V001_VERIFIED,
        }
    }

    /// Create failure outcome
    pub fn failure(
        occurred_at: DateTime<Utc>,
        reason: ReasonCode,
        message: Option<String>,
    ) -> Self {
        Self {
            succeeded: false,
            occurred_at,
            failure_reason: message,
            reason,
        }
    }
}
