//! Core types for the verification pipeline

mod auth;
mod features;
mod reason;
mod result;
mod submission;
mod vault;
mod weights;

pub use auth::{AuthenticationOutcome, BiometricAvailability, BiometryKind};
pub use features::{FeatureContext, FeatureIndex, FeatureVector};
pub use reason::ReasonCode;
pub use result::{InvocationTag, VerificationResult};
pub use submission::{CheckinReceipt, SubmissionPayload, SubmissionReceipt};
pub use vault::VaultStatus;
pub use weights::ClassifierWeights;
