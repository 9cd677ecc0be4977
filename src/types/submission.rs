//! Backend wire shapes
//!
//! This crate only assembles the outgoing payload and parses the replies.
//! Submitting and deciding the emergency reset happen on the backend.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::VaultStatus;

/// Body of the score submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Transport score 0-10000
    #[serde(rename = "perceptronOutput")]
    pub transport_score: u32,
    /// Invocation tag
    pub source: String,
}

/// Backend reply to a score submission
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub score: u32,
    pub tx_hash: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionReceipt {
    /// Passed through untouched
    pub fn transaction_reference(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }
}

/// Backend reply to an emergency check-in
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinReceipt {
    pub score: u32,
    pub tx_hash: Option<String>,
    pub vault_status: VaultStatus,
}

impl CheckinReceipt {
    pub fn transaction_reference(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }
}
