//! Pulse CLI
//!
//! Usage:
//!   pulse verify                                  # Proof-of-life check (terminal prompt)
//!   pulse verify --last-verified 2026-01-01T00:00:00Z
//!   pulse verify --emergency --vault-status alert # Emergency check-in
//!   pulse verify --simulate deny --json           # Scripted platform, JSON output
//!   pulse score --features 0.85,0.8,0.9,...       # Classifier only
//!   pulse serve --addr 127.0.0.1:3000             # HTTP API server

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

use pulse_liveness::config::PulseConfig;
use pulse_liveness::core::{
    run_server, BiometricPlatform, Perceptron, ScriptedPlatform, TerminalPlatform,
    VerificationOrchestrator,
};
use pulse_liveness::types::{VaultStatus, VerificationResult};
use pulse_liveness::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "pulse",
    version = VERSION,
    about = "Pulse proof-of-life - biometric check and liveness score",
    long_about = "Pulse runs the proof-of-life pipeline locally:\n\n\
                  biometric prompt → feature extraction → perceptron → score\n\n\
                  The score (0-10000) and its source tag are what the backend\n\
                  receives. Submission itself happens elsewhere.\n\n\
                  Sources:\n  \
                  mobile_biometric       - Normal verification\n  \
                  emergency_checkin      - Emergency check-in (backend resets vault)\n  \
                  biometric_unavailable  - No usable sensor\n  \
                  biometric_failed       - Prompt failed or was cancelled"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log debug output and show feature breakdown
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a proof-of-life verification
    Verify {
        /// Last successful verification (RFC 3339). Omit if never verified.
        #[arg(long)]
        last_verified: Option<DateTime<Utc>>,

        /// Tag the result as an emergency check-in
        #[arg(short, long)]
        emergency: bool,

        /// Current vault status; emergency check-in needs ALERT or GRACE_PERIOD
        #[arg(long)]
        vault_status: Option<VaultStatus>,

        /// Use a scripted platform instead of the terminal prompt
        #[arg(long, value_enum)]
        simulate: Option<Simulate>,

        /// Fixed jitter seed (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,

        /// Override the prompt message
        #[arg(long)]
        prompt: Option<String>,

        /// Output the full result as JSON
        #[arg(long)]
        json: bool,

        /// Output only the backend submission payload as JSON
        #[arg(long)]
        payload: bool,
    },

    /// Classify a feature vector without prompting
    Score {
        /// Ten comma-separated values in [0, 1]
        #[arg(short, long)]
        features: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run as HTTP API server
    Serve {
        /// Server address (default: PULSE_ADDR or 127.0.0.1:3000)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Simulate {
    Approve,
    Deny,
    Cancel,
    Unavailable,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match PulseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match args.command {
        Command::Verify {
            last_verified,
            emergency,
            vault_status,
            simulate,
            seed,
            prompt,
            json,
            payload,
        } => {
            if let Some(status) = vault_status {
                if emergency && !status.allows_emergency_checkin() {
                    eprintln!(
                        "Emergency check-in is only available when the vault is ALERT or GRACE_PERIOD (current: {})",
                        status
                    );
                    return ExitCode::FAILURE;
                }
            }
            if let Some(seed) = seed {
                config.jitter_seed = Some(seed);
            }
            if let Some(prompt) = prompt {
                config.prompt_message = prompt;
            }

            let opts = VerifyOutput {
                json,
                payload,
                verbose: args.verbose,
                no_color: args.no_color,
                vault_status,
            };
            match simulate {
                Some(mode) => {
                    let platform = match mode {
                        Simulate::Approve => ScriptedPlatform::approving(),
                        Simulate::Deny => ScriptedPlatform::denying(),
                        Simulate::Cancel => ScriptedPlatform::cancelling(),
                        Simulate::Unavailable => ScriptedPlatform::unavailable(),
                    };
                    run_verify(platform, &config, last_verified, emergency, opts).await
                }
                None => {
                    let platform = TerminalPlatform::new();
                    run_verify(platform, &config, last_verified, emergency, opts).await
                }
            }
        }
        Command::Score { features, json } => {
            run_score(&features, &config, json, args.no_color)
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or(config.server_addr.clone());
            match run_server(&addr, Perceptron::from_weights(config.weights)).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Server error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Output switches for `verify`
#[derive(Debug, Clone, Copy)]
struct VerifyOutput {
    json: bool,
    payload: bool,
    verbose: bool,
    no_color: bool,
    vault_status: Option<VaultStatus>,
}

/// Run one verification against the given platform
async fn run_verify<P: BiometricPlatform>(
    platform: P,
    config: &PulseConfig,
    last_verified: Option<DateTime<Utc>>,
    emergency: bool,
    out: VerifyOutput,
) -> ExitCode {
    let orchestrator = VerificationOrchestrator::from_config(platform, config);

    let result = if emergency {
        orchestrator.run_emergency_verification(last_verified).await
    } else {
        orchestrator.run_verification(last_verified).await
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Internal error: {}", e);
            return ExitCode::from(2);
        }
    };

    if out.payload {
        match result.submission_payload() {
            Some(payload) => print_json(&payload),
            None => println!("null"),
        }
    } else if out.json {
        print_json(&result);
    } else {
        print_result(&result, out.vault_status, out.verbose, out.no_color);
    }

    if result.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Classifier-only path
fn run_score(features: &str, config: &PulseConfig, json: bool, no_color: bool) -> ExitCode {
    let values: Result<Vec<f64>, _> = features
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>())
        .collect();
    let values = match values {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Invalid feature value: {}", e);
            return ExitCode::from(2);
        }
    };

    let perceptron = Perceptron::from_weights(config.weights.clone());
    let confidence = match perceptron.predict(&values) {
        Ok(confidence) => confidence,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    let score = Perceptron::to_transport_score(confidence);

    if json {
        print_json(&serde_json::json!({
            "confidence": confidence,
            "transportScore": score,
        }));
    } else if no_color {
        println!("score={} | confidence={:.4}", score, confidence);
    } else {
        println!("\x1b[36mscore={} | confidence={:.4}\x1b[0m", score, confidence);
    }
    ExitCode::SUCCESS
}

/// Print result with optional feature breakdown
fn print_result(
    result: &VerificationResult,
    vault_status: Option<VaultStatus>,
    verbose: bool,
    no_color: bool,
) {
    if no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }

    if let Some(status) = vault_status {
        if no_color {
            println!("  Vault: {}", status);
        } else {
            println!("  Vault: {}{}{}", status.color_code(), status, VaultStatus::color_reset());
        }
    }

    if verbose {
        if let Some(ref features) = result.features {
            println!();
            println!("  Features:");
            for (name, value) in features.labeled() {
                println!("    {:<26} {:.4}", name, value);
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Serialization error: {}", e),
    }
}
