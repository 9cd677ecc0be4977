//! Vault status as reported by the custody backend
//!
//! The vault state machine lives remotely. Here it only gates whether an
//! emergency check-in makes sense before prompting the user.

use serde::{Deserialize, Serialize};

/// The five remote vault states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaultStatus {
    /// Owner considered alive
    Active,
    /// Score dropped, owner should check in
    Alert,
    /// Last chance before trigger
    GracePeriod,
    /// Inheritance triggered
    Triggered,
    /// Assets distributed
    Distributed,
}

impl VaultStatus {
    /// Emergency check-in only applies to ALERT and GRACE_PERIOD
    pub fn allows_emergency_checkin(&self) -> bool {
        matches!(self, VaultStatus::Alert | VaultStatus::GracePeriod)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            VaultStatus::Active => "\x1b[32m",      // Green
            VaultStatus::Alert => "\x1b[33m",       // Orange/Yellow
            VaultStatus::GracePeriod => "\x1b[31m", // Red
            VaultStatus::Triggered | VaultStatus::Distributed => "\x1b[90m", // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VaultStatus::Active => "ACTIVE",
            VaultStatus::Alert => "ALERT",
            VaultStatus::GracePeriod => "GRACE_PERIOD",
            VaultStatus::Triggered => "TRIGGERED",
            VaultStatus::Distributed => "DISTRIBUTED",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for VaultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => Ok(VaultStatus::Active),
            "ALERT" => Ok(VaultStatus::Alert),
            "GRACE_PERIOD" => Ok(VaultStatus::GracePeriod),
            "TRIGGERED" => Ok(VaultStatus::Triggered),
            "DISTRIBUTED" => Ok(VaultStatus::Distributed),
            other => Err(format!("unknown vault status '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_eligibility() {
        assert!(VaultStatus::Alert.allows_emergency_checkin());
        assert!(VaultStatus::GracePeriod.allows_emergency_checkin());
        assert!(!VaultStatus::Active.allows_emergency_checkin());
        assert!(!VaultStatus::Triggered.allows_emergency_checkin());
        assert!(!VaultStatus::Distributed.allows_emergency_checkin());
    }

    #[test]
    fn test_parse_and_display_agree() {
        for status in [
            VaultStatus::Active,
            VaultStatus::Alert,
            VaultStatus::GracePeriod,
            VaultStatus::Triggered,
            VaultStatus::Distributed,
        ] {
            assert_eq!(status.to_string().parse::<VaultStatus>().unwrap(), status);
        }
        assert_eq!("grace-period".parse::<VaultStatus>().unwrap(), VaultStatus::GracePeriod);
        assert!("frozen".parse::<VaultStatus>().is_err());
    }

    #[test]
    fn test_serde_screaming_case() {
        let json = serde_json::to_string(&VaultStatus::GracePeriod).unwrap();
        assert_eq!(json, "\"GRACE_PERIOD\"");
    }
}
