//! Runtime configuration
//!
//! Read from `PULSE_*` environment variables; CLI flags override.

use std::env;
use crate::{DEFAULT_PROMPT, LivenessError, Result};
use crate::types::ClassifierWeights;

/// Default API bind address
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct PulseConfig {
    /// Message shown in the biometric prompt
    pub prompt_message: String,
    /// Fixed jitter seed (demos and reproducible runs only)
    pub jitter_seed: Option<u64>,
    /// API bind address
    pub server_addr: String,
    /// Classifier weights and bias
    pub weights: ClassifierWeights,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            prompt_message: DEFAULT_PROMPT.to_string(),
            jitter_seed: None,
            server_addr: DEFAULT_ADDR.to_string(),
            weights: ClassifierWeights::default(),
        }
    }
}

impl PulseConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup (env in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let jitter_seed = match lookup("PULSE_JITTER_SEED") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                LivenessError::Config(format!("PULSE_JITTER_SEED is not a u64: '{}'", raw))
            })?),
            None => None,
        };

        let weights = match lookup("PULSE_WEIGHTS") {
            Some(raw) => ClassifierWeights::parse(&raw)?,
            None => defaults.weights,
        };

        Ok(Self {
            prompt_message: lookup("PULSE_PROMPT").unwrap_or(defaults.prompt_message),
            jitter_seed,
            server_addr: lookup("PULSE_ADDR").unwrap_or(defaults.server_addr),
            weights,
        })
    }
}
