//! Feature layout, extraction context and the validated feature vector
//!
//! Slot order is fixed and must match the weight order in the perceptron.
//! Two slots are measured (fingerprint, recency); eight are synthetic.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::{FEATURE_COUNT, LivenessError, Result};

/// The ten feature slots, in vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureIndex {
    FaceMatch,
    FaceLiveness,
    /// Measured: biometric pass/fail
    FingerprintFrequency,
    FingerprintConsistency,
    TimeOfDayNormality,
    TypingPatternMatch,
    AppUsageMatch,
    MovementPatternMatch,
    /// Measured: decay since last verification
    DaysSinceLastVerify,
    SessionBehavior,
}

impl FeatureIndex {
    /// All slots in vector order
    pub const ALL: [FeatureIndex; FEATURE_COUNT] = [
        FeatureIndex::FaceMatch,
        FeatureIndex::FaceLiveness,
        FeatureIndex::FingerprintFrequency,
        FeatureIndex::FingerprintConsistency,
        FeatureIndex::TimeOfDayNormality,
        FeatureIndex::TypingPatternMatch,
        FeatureIndex::AppUsageMatch,
        FeatureIndex::MovementPatternMatch,
        FeatureIndex::DaysSinceLastVerify,
        FeatureIndex::SessionBehavior,
    ];

    /// Position in the vector
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Stable feature name (matches backend column names)
    pub fn name(&self) -> &'static str {
        match self {
            Self::FaceMatch => "face_match_score",
            Self::FaceLiveness => "face_liveness_score",
            Self::FingerprintFrequency => "fingerprint_frequency",
            Self::FingerprintConsistency => "fingerprint_consistency",
            Self::TimeOfDayNormality => "time_of_day_normality",
            Self::TypingPatternMatch => "typing_pattern_match",
            Self::AppUsageMatch => "app_usage_match",
            Self::MovementPatternMatch => "movement_pattern_match",
            Self::DaysSinceLastVerify => "days_since_last_verify",
            Self::SessionBehavior => "session_behavior",
        }
    }

    /// Backed by a real measurement (not a synthetic placeholder)
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::FingerprintFrequency | Self::DaysSinceLastVerify)
    }
}

/// Input to extraction, one per verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureContext {
    pub authentication_succeeded: bool,
    /// None when the user has never verified
    #[serde(default)]
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl FeatureContext {
    pub fn new(authentication_succeeded: bool, last_verified_at: Option<DateTime<Utc>>) -> Self {
        Self { authentication_succeeded, last_verified_at }
    }
}

/// Exactly ten values, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Validate length and range
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(LivenessError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(LivenessError::FeatureOutOfRange { index, value });
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a named slot
    pub fn get(&self, index: FeatureIndex) -> f64 {
        self.values[index.position()]
    }

    /// (name, value) pairs in vector order
    pub fn labeled(&self) -> Vec<(&'static str, f64)> {
        FeatureIndex::ALL
            .iter()
            .map(|idx| (idx.name(), self.get(*idx)))
            .collect()
    }
}

impl<'de> Deserialize<'de> for FeatureVector {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        FeatureVector::new(values).map_err(serde::de::Error::custom)
    }
}
