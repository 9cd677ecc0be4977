//! Core modules for the verification pipeline

pub mod biometric;
pub mod features;
pub mod perceptron;
pub mod verifier;
pub mod api;

pub use biometric::{
    BiometricAdapter, BiometricPlatform, PlatformError,
    ScriptedPlatform, ScriptedResponse, TerminalPlatform,
};
pub use features::FeatureExtractor;
pub use perceptron::Perceptron;
pub use verifier::{VerificationOrchestrator, DEFAULT_AUTH_FAILURE};
pub use api::{create_router, create_router_with, run_server};
