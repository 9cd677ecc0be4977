//! Biometric capability adapter
//!
//! `BiometricPlatform` is the black-box platform prompt. `BiometricAdapter`
//! wraps it and guarantees callers never see a raw platform error: every
//! failure becomes `available=false` or an `AuthenticationOutcome` with
//! `succeeded=false`. No retries here; re-invoking is the caller's call.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use crate::types::{AuthenticationOutcome, BiometricAvailability, BiometryKind, ReasonCode};

/// Errors raised by a platform implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    #[error("Biometric sensor unavailable: {0}")]
    Unavailable(String),

    #[error("User cancelled biometric prompt")]
    Cancelled,

    #[error("Biometric lockout: {0}")]
    Lockout(String),

    #[error("{0}")]
    Other(String),
}

/// Platform-provided biometric prompt
#[async_trait]
pub trait BiometricPlatform: Send + Sync {
    /// Sensor kind, or None when the device has no usable sensor
    async fn sensor_kind(&self) -> Result<Option<BiometryKind>, PlatformError>;

    /// Show the prompt and wait for the user. Ok(false) means the check failed.
    async fn prompt(&self, message: &str) -> Result<bool, PlatformError>;
}

/// Normalizes a platform into the adapter contract
#[derive(Debug)]
pub struct BiometricAdapter<P> {
    platform: P,
}

impl<P: BiometricPlatform> BiometricAdapter<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Never fails: any platform error reads as unavailable
    pub async fn check_availability(&self) -> BiometricAvailability {
        match self.platform.sensor_kind().await {
            Ok(Some(kind)) => BiometricAvailability::available(kind),
            Ok(None) => BiometricAvailability::unavailable(),
            Err(e) => {
                log::warn!("biometric availability check failed: {}", e);
                BiometricAvailability::unavailable()
            }
        }
    }

    /// Suspends until the user responds, cancels, or the platform gives up
    pub async fn authenticate(&self, message: &str) -> AuthenticationOutcome {
        let response = self.platform.prompt(message).await;
        let occurred_at = Utc::now();

        match response {
            Ok(true) => AuthenticationOutcome::success(occurred_at),
            Ok(false) => AuthenticationOutcome::failure(
                occurred_at,
                ReasonCode::V102_BIOMETRIC_REJECTED,
                None,
            ),
            Err(PlatformError::Cancelled) => AuthenticationOutcome::failure(
                occurred_at,
                ReasonCode::V103_BIOMETRIC_CANCELLED,
                Some(PlatformError::Cancelled.to_string()),
            ),
            Err(e) => {
                log::warn!("biometric prompt error: {}", e);
                AuthenticationOutcome::failure(
                    occurred_at,
                    ReasonCode::V104_PLATFORM_ERROR,
                    Some(e.to_string()),
                )
            }
        }
    }
}

// =============================================================================
// SCRIPTED PLATFORM - deterministic responses
// =============================================================================

/// How a scripted prompt resolves
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedResponse {
    Approve,
    Deny,
    Cancel,
    Fail(String),
}

/// Platform with fixed answers, counts how often it was prompted
#[derive(Debug)]
pub struct ScriptedPlatform {
    sensor: Result<Option<BiometryKind>, PlatformError>,
    response: ScriptedResponse,
    prompts: AtomicUsize,
}

impl ScriptedPlatform {
    pub fn new(
        sensor: Result<Option<BiometryKind>, PlatformError>,
        response: ScriptedResponse,
    ) -> Self {
        Self {
            sensor,
            response,
            prompts: AtomicUsize::new(0),
        }
    }

    /// Sensor present, user passes
    pub fn approving() -> Self {
        Self::new(Ok(Some(BiometryKind::Biometrics)), ScriptedResponse::Approve)
    }

    /// Sensor present, user fails the check
    pub fn denying() -> Self {
        Self::new(Ok(Some(BiometryKind::Biometrics)), ScriptedResponse::Deny)
    }

    /// Sensor present, user dismisses the prompt
    pub fn cancelling() -> Self {
        Self::new(Ok(Some(BiometryKind::Biometrics)), ScriptedResponse::Cancel)
    }

    /// Sensor present, prompt raises an error
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Ok(Some(BiometryKind::Biometrics)), ScriptedResponse::Fail(message.into()))
    }

    /// No sensor
    pub fn unavailable() -> Self {
        Self::new(Ok(None), ScriptedResponse::Approve)
    }

    /// Sensor query itself errors
    pub fn broken_sensor(message: impl Into<String>) -> Self {
        Self::new(
            Err(PlatformError::Unavailable(message.into())),
            ScriptedResponse::Approve,
        )
    }

    /// Number of prompts shown so far
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BiometricPlatform for ScriptedPlatform {
    async fn sensor_kind(&self) -> Result<Option<BiometryKind>, PlatformError> {
        self.sensor.clone()
    }

    async fn prompt(&self, _message: &str) -> Result<bool, PlatformError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            ScriptedResponse::Approve => Ok(true),
            ScriptedResponse::Deny => Ok(false),
            ScriptedResponse::Cancel => Err(PlatformError::Cancelled),
            ScriptedResponse::Fail(msg) => Err(PlatformError::Other(msg.clone())),
        }
    }
}

// =============================================================================
// TERMINAL PLATFORM - confirmation on stdin
// =============================================================================

/// Interactive confirmation, available only when stdin is a terminal
#[derive(Debug, Default)]
pub struct TerminalPlatform;

impl TerminalPlatform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BiometricPlatform for TerminalPlatform {
    async fn sensor_kind(&self) -> Result<Option<BiometryKind>, PlatformError> {
        if io::stdin().is_terminal() {
            Ok(Some(BiometryKind::Biometrics))
        } else {
            Ok(None)
        }
    }

    async fn prompt(&self, message: &str) -> Result<bool, PlatformError> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            let mut stdout = io::stdout();
            write!(stdout, "🔐 {} [y/N/c]: ", message)
                .and_then(|_| stdout.flush())
                .map_err(|e| PlatformError::Other(e.to_string()))?;

            let mut line = String::new();
            let read = io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(|e| PlatformError::Other(e.to_string()))?;
            if read == 0 {
                return Err(PlatformError::Cancelled);
            }
            parse_answer(&line)
        })
        .await
        .map_err(|e| PlatformError::Other(format!("prompt task failed: {}", e)))?
    }
}

/// y/yes passes, c/cancel cancels, anything else fails
fn parse_answer(line: &str) -> Result<bool, PlatformError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "c" | "cancel" => Err(PlatformError::Cancelled),
        _ => Ok(false),
    }
}

// =============================================================================
// TESTS
// =============================================================================
