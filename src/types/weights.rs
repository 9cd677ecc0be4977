//! Classifier weights: fixed configuration, checked once at construction

use serde::{Deserialize, Serialize};
use crate::{FEATURE_COUNT, DEFAULT_WEIGHTS, DEFAULT_BIAS, LivenessError, Result};

/// Ten weights paired positionally with feature slots, plus a bias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct ClassifierWeights {
    weights: [f64; FEATURE_COUNT],
    bias: f64,
}

#[derive(Deserialize)]
struct RawWeights {
    weights: Vec<f64>,
    bias: f64,
}

impl TryFrom<RawWeights> for ClassifierWeights {
    type Error = LivenessError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        ClassifierWeights::new(&raw.weights, raw.bias)
    }
}

impl Default for ClassifierWeights {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            bias: DEFAULT_BIAS,
        }
    }
}

impl ClassifierWeights {
    /// Never truncates or pads: any length other than ten is an error
    pub fn new(weights: &[f64], bias: f64) -> Result<Self> {
        let weights: [f64; FEATURE_COUNT] = weights.try_into().map_err(|_| {
            LivenessError::WeightCount {
                expected: FEATURE_COUNT,
                actual: weights.len(),
            }
        })?;
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(LivenessError::NonFiniteWeight { index });
        }
        if !bias.is_finite() {
            return Err(LivenessError::Config("bias is not a finite number".to_string()));
        }
        Ok(Self { weights, bias })
    }

    pub fn weights(&self) -> &[f64; FEATURE_COUNT] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Parse `w1,...,w10;bias` (bias optional, defaults to the built-in bias)
    pub fn parse(raw: &str) -> Result<Self> {
        let (weights_part, bias_part) = match raw.split_once(';') {
            Some((w, b)) => (w, Some(b)),
            None => (raw, None),
        };

        let weights = weights_part
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|_| LivenessError::Config(format!("invalid weight '{}'", s)))
            })
            .collect::<Result<Vec<f64>>>()?;

        let bias = match bias_part {
            Some(b) => b
                .trim()
                .parse::<f64>()
                .map_err(|_| LivenessError::Config(format!("invalid bias '{}'", b.trim())))?,
            None => DEFAULT_BIAS,
        };

        Self::new(&weights, bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let w = ClassifierWeights::default();
        assert_eq!(w.weights(), &DEFAULT_WEIGHTS);
        assert_eq!(w.bias(), DEFAULT_BIAS);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = ClassifierWeights::new(&[0.5, 0.5], 0.0).unwrap_err();
        assert_eq!(err, LivenessError::WeightCount { expected: 10, actual: 2 });
        assert_eq!(err.to_string(), "Expected 10 weights, got 2");
    }

    #[test]
    fn test_eleven_weights_rejected_not_truncated() {
        let err = ClassifierWeights::new(&[0.1; 11], 0.0).unwrap_err();
        assert_eq!(err, LivenessError::WeightCount { expected: 10, actual: 11 });
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut w = [0.1; 10];
        w[3] = f64::INFINITY;
        assert_eq!(
            ClassifierWeights::new(&w, 0.0).unwrap_err(),
            LivenessError::NonFiniteWeight { index: 3 }
        );
        assert!(ClassifierWeights::new(&[0.1; 10], f64::NAN).is_err());
    }

    #[test]
    fn test_parse_with_bias() {
        let w = ClassifierWeights::parse("1,1,1,1,1,1,1,1,1,1;-2.5").unwrap();
        assert_eq!(w.weights(), &[1.0; 10]);
        assert_eq!(w.bias(), -2.5);
    }

    #[test]
    fn test_parse_without_bias_uses_default() {
        let w = ClassifierWeights::parse("0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0").unwrap();
        assert_eq!(w.bias(), DEFAULT_BIAS);
        assert_eq!(w.weights()[9], 1.0);
    }

    #[test]
    fn test_parse_short_list_fails() {
        assert!(matches!(
            ClassifierWeights::parse("1,2,3"),
            Err(LivenessError::WeightCount { actual: 3, .. })
        ));
        assert!(matches!(
            ClassifierWeights::parse("1,2,x,4,5,6,7,8,9,10"),
            Err(LivenessError::Config(_))
        ));
    }

    #[test]
    fn test_deserialize_checks_length() {
        let ok: ClassifierWeights =
            serde_json::from_str(r#"{"weights":[1,1,1,1,1,1,1,1,1,1],"bias":0}"#).unwrap();
        assert_eq!(ok.bias(), 0.0);
        let bad: std::result::Result<ClassifierWeights, _> =
            serde_json::from_str(r#"{"weights":[1,1],"bias":0}"#);
        assert!(bad.is_err());
    }
}
