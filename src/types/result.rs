//! Verification result handed to the screen / submission layer

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{FeatureVector, ReasonCode, SubmissionPayload};
use crate::{
    TAG_MOBILE_BIOMETRIC, TAG_EMERGENCY_CHECKIN,
    TAG_BIOMETRIC_UNAVAILABLE, TAG_BIOMETRIC_FAILED,
};

/// Context of a verification attempt, read by the backend to pick a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationTag {
    MobileBiometric,
    EmergencyCheckin,
    BiometricUnavailable,
    BiometricFailed,
}

impl InvocationTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationTag::MobileBiometric => TAG_MOBILE_BIOMETRIC,
            InvocationTag::EmergencyCheckin => TAG_EMERGENCY_CHECKIN,
            InvocationTag::BiometricUnavailable => TAG_BIOMETRIC_UNAVAILABLE,
            InvocationTag::BiometricFailed => TAG_BIOMETRIC_FAILED,
        }
    }
}

impl std::fmt::Display for InvocationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One per orchestrator invocation. A value: forward it, don't mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub succeeded: bool,
    /// 0-10000, zero on failure
    pub transport_score: u32,
    /// Sigmoid output, zero on failure
    pub raw_confidence: f64,
    /// Absent on failure, `[]` on the wire
    #[serde(with = "features_or_empty")]
    pub features: Option<FeatureVector>,
    pub invocation_tag: InvocationTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub reason: ReasonCode,
    /// Instant the features were evaluated against
    pub evaluated_at: DateTime<Utc>,
}

impl VerificationResult {
    /// Create success result
    pub fn success(
        transport_score: u32,
        raw_confidence: f64,
        features: FeatureVector,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            succeeded: true,
            transport_score,
            raw_confidence,
            features: Some(features),
            invocation_tag: InvocationTag::MobileBiometric,
            failure_reason: None,
            reason: ReasonCode::V001_VERIFIED,
            evaluated_at,
        }
    }

    /// Create failure result with zeroed score and no features
    pub fn failure(
        invocation_tag: InvocationTag,
        reason: ReasonCode,
        message: impl Into<String>,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            succeeded: false,
            transport_score: 0,
            raw_confidence: 0.0,
            features: None,
            invocation_tag,
            failure_reason: Some(message.into()),
            reason,
            evaluated_at,
        }
    }

    /// Feature values, empty on failure
    pub fn feature_values(&self) -> &[f64] {
        self.features.as_ref().map(|f| f.as_slice()).unwrap_or(&[])
    }

    /// Backend payload. None for failed results: nothing to submit.
    pub fn submission_payload(&self) -> Option<SubmissionPayload> {
        if !self.succeeded {
            return None;
        }
        Some(SubmissionPayload {
            transport_score: self.transport_score,
            source: self.invocation_tag.as_str().to_string(),
        })
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let (color, mark) = if self.succeeded {
            ("\x1b[32m", "✔")
        } else {
            ("\x1b[31m", "✘")
        };
        format!("{}{} {}\x1b[0m", color, mark, self.to_parseable_string())
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let mut line = format!(
            "score={} | confidence={:.4} | source={} | reason={}",
            self.transport_score,
            self.raw_confidence,
            self.invocation_tag,
            self.reason.code()
        );
        if let Some(ref msg) = self.failure_reason {
            line.push_str(&format!(" | error={}", msg));
        }
        line
    }
}

/// Failed results carry `features: []`, which reads back as `None`
mod features_or_empty {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::types::FeatureVector;

    pub fn serialize<S>(
        features: &Option<FeatureVector>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match features {
            Some(vector) => vector.serialize(serializer),
            None => serializer.collect_seq(std::iter::empty::<f64>()),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<FeatureVector>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Vec<f64>>::deserialize(deserializer)?.unwrap_or_default();
        if values.is_empty() {
            return Ok(None);
        }
        FeatureVector::new(values)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
