//! Reason codes for verification outcomes
//! V0xx success, V1xx biometric stage

use serde::{Deserialize, Serialize};

/// Reason codes attached to every authentication outcome and verification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // V001: Success
    // =========================================================================
    /// Biometric passed, features scored
    V001_VERIFIED,

    // =========================================================================
    // V1xx: Biometric stage
    // =========================================================================
    /// No usable sensor, prompt never shown
    V101_BIOMETRIC_UNAVAILABLE,
    /// User failed the biometric check
    V102_BIOMETRIC_REJECTED,
    /// User or platform dismissed the prompt
    V103_BIOMETRIC_CANCELLED,
    /// Platform layer raised an unexpected error
    V104_PLATFORM_ERROR,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::V001_VERIFIED => "V001_VERIFIED",
            Self::V101_BIOMETRIC_UNAVAILABLE => "V101_BIOMETRIC_UNAVAILABLE",
            Self::V102_BIOMETRIC_REJECTED => "V102_BIOMETRIC_REJECTED",
            Self::V103_BIOMETRIC_CANCELLED => "V103_BIOMETRIC_CANCELLED",
            Self::V104_PLATFORM_ERROR => "V104_PLATFORM_ERROR",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::V001_VERIFIED => "Verification complete",
            Self::V101_BIOMETRIC_UNAVAILABLE => "Biometric authentication is not available on this device",
            Self::V102_BIOMETRIC_REJECTED => "Biometric authentication failed",
            Self::V103_BIOMETRIC_CANCELLED => "Biometric authentication was cancelled",
            Self::V104_PLATFORM_ERROR => "Biometric platform error",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
