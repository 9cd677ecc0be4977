//! Verification orchestrator
//!
//! Sequence, each step short-circuiting:
//! 1. availability → `biometric_unavailable` (no prompt shown)
//! 2. authenticate → `biometric_failed`
//! 3. extract features
//! 4. perceptron → confidence → transport score
//! 5. `mobile_biometric` result
//!
//! Runtime failures come back as `Ok(result)` with `succeeded=false`.
//! `Err` is reserved for invariant violations (wrong-length vectors).
//!
//! The emergency entry point only relabels a successful result. The client
//! always reports its honest score; the backend decides the reset.

use std::sync::Mutex;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::{DEFAULT_PROMPT, Result};
use crate::config::PulseConfig;
use crate::core::{BiometricAdapter, BiometricPlatform, FeatureExtractor, Perceptron};
use crate::types::{FeatureContext, InvocationTag, ReasonCode, VerificationResult};

/// Used when the adapter reports failure without a message
pub const DEFAULT_AUTH_FAILURE: &str = "Biometric authentication was cancelled or failed";

/// Runs the full pipeline against one biometric platform
#[derive(Debug)]
pub struct VerificationOrchestrator<P> {
    adapter: BiometricAdapter<P>,
    extractor: FeatureExtractor,
    perceptron: Perceptron,
    prompt_message: String,
    /// Seeded jitter source, advanced on every extraction
    jitter: Option<Mutex<StdRng>>,
}

impl<P: BiometricPlatform> VerificationOrchestrator<P> {
    /// Default weights, default prompt, entropy-backed jitter
    pub fn new(platform: P) -> Self {
        Self {
            adapter: BiometricAdapter::new(platform),
            extractor: FeatureExtractor::new(),
            perceptron: Perceptron::new(),
            prompt_message: DEFAULT_PROMPT.to_string(),
            jitter: None,
        }
    }

    /// Build from runtime configuration
    pub fn from_config(platform: P, config: &PulseConfig) -> Self {
        let orchestrator = Self::new(platform)
            .with_perceptron(Perceptron::from_weights(config.weights.clone()))
            .with_prompt(config.prompt_message.clone());
        match config.jitter_seed {
            Some(seed) => orchestrator.with_jitter_seed(seed),
            None => orchestrator,
        }
    }

    pub fn with_perceptron(mut self, perceptron: Perceptron) -> Self {
        self.perceptron = perceptron;
        self
    }

    pub fn with_prompt(mut self, message: impl Into<String>) -> Self {
        self.prompt_message = message.into();
        self
    }

    /// Seeded jitter: the sequence of runs is reproducible, consecutive runs
    /// still draw fresh offsets
    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter = Some(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn adapter(&self) -> &BiometricAdapter<P> {
        &self.adapter
    }

    pub fn perceptron(&self) -> &Perceptron {
        &self.perceptron
    }

    /// Normal proof-of-life verification
    pub async fn run_verification(
        &self,
        last_verified_at: Option<DateTime<Utc>>,
    ) -> Result<VerificationResult> {
        self.run_verification_at(last_verified_at, Utc::now()).await
    }

    /// Same as `run_verification`, evaluated against a fixed instant
    pub async fn run_verification_at(
        &self,
        last_verified_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<VerificationResult> {
        // Step 1: capability
        let availability = self.adapter.check_availability().await;
        if !availability.available {
            log::warn!("verification aborted: biometric unavailable");
            return Ok(VerificationResult::failure(
                InvocationTag::BiometricUnavailable,
                ReasonCode::V101_BIOMETRIC_UNAVAILABLE,
                ReasonCode::V101_BIOMETRIC_UNAVAILABLE.description(),
                now,
            ));
        }
        log::debug!("biometric available: {:?}", availability.kind);

        // Step 2: prompt (sole suspension point)
        let outcome = self.adapter.authenticate(&self.prompt_message).await;
        if !outcome.succeeded {
            let message = outcome
                .failure_reason
                .unwrap_or_else(|| DEFAULT_AUTH_FAILURE.to_string());
            log::warn!("verification aborted: {} ({})", outcome.reason.code(), message);
            return Ok(VerificationResult::failure(
                InvocationTag::BiometricFailed,
                outcome.reason,
                message,
                now,
            ));
        }

        // Step 3: features
        let context = FeatureContext::new(true, last_verified_at);
        let features = match &self.jitter {
            Some(jitter) => {
                // A poisoned lock still holds a usable RNG
                let mut rng = jitter.lock().unwrap_or_else(|e| e.into_inner());
                self.extractor.extract_with_rng(&context, now, &mut *rng)?
            }
            None => self.extractor.extract(&context, now)?,
        };

        // Step 4: classify
        let confidence = self.perceptron.predict_vector(&features)?;
        let score = Perceptron::to_transport_score(confidence);

        // Step 5: result
        log::info!("verification complete: score={} confidence={:.4}", score, confidence);
        Ok(VerificationResult::success(score, confidence, features, now))
    }

    /// Emergency check-in: identical run, tag rewritten only on success
    pub async fn run_emergency_verification(
        &self,
        last_verified_at: Option<DateTime<Utc>>,
    ) -> Result<VerificationResult> {
        self.run_emergency_verification_at(last_verified_at, Utc::now()).await
    }

    pub async fn run_emergency_verification_at(
        &self,
        last_verified_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<VerificationResult> {
        let mut result = self.run_verification_at(last_verified_at, now).await?;
        if result.succeeded {
            result.invocation_tag = InvocationTag::EmergencyCheckin;
        }
        Ok(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
