//! Gemini credential probe CLI.
//!
//! Takes an API key on the command line and issues diagnostic requests
//! against the Generative Language API: one text-generation probe with
//! bearer auth, then a multimodal probe across every known authentication
//! header shape, stopping at the first one the service accepts. Findings go
//! to stdout, logs to stderr.

mod auth;
mod payload;
mod probe;
mod report;

use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::info;

use crate::probe::ProbeRunner;

/// Gemini credential probe CLI
#[derive(Parser)]
#[command(name = "gemini-probe-cli")]
#[command(about = "Probes a Gemini API credential across authentication header shapes")]
#[command(version)]
struct Cli {
    /// API key to probe
    credential: Option<String>,

    /// Override the service base URL (e.g. a relay under diagnosis)
    #[arg(long, default_value = payload::DEFAULT_BASE_URL)]
    base_url: String,

    /// Pause between strategy attempts, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gemini_probe=debug".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let credential = match cli.credential {
        Some(credential) if !credential.is_empty() => credential,
        _ => {
            print_usage();
            std::process::exit(1);
        }
    };

    info!("starting credential probe");

    println!("=== Gemini credential probe ===");
    println!("started: {}", Utc::now().to_rfc3339());
    println!(
        "credential: {} ({} chars, sha256:{})",
        report::mask_credential(&credential),
        credential.chars().count(),
        report::fingerprint(&credential)
    );

    let runner = ProbeRunner::new(
        credential,
        cli.base_url,
        Duration::from_millis(cli.delay_ms),
    )?;

    runner.text_probe().await;
    runner.multimodal_probe().await;

    println!();
    println!("probe finished");

    Ok(())
}

/// Printed on stdout when the credential argument is missing or empty.
fn print_usage() {
    println!("Usage: gemini-probe-cli <API_KEY> [--base-url <URL>] [--delay-ms <N>]");
    println!();
    println!("Probes the Gemini generateContent endpoints with several");
    println!("authentication header shapes and reports how the service");
    println!("responds to each one.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_parses_as_none() {
        let cli = Cli::try_parse_from(["gemini-probe-cli"]).unwrap();
        assert!(cli.credential.is_none());
        assert_eq!(cli.base_url, payload::DEFAULT_BASE_URL);
        assert_eq!(cli.delay_ms, 1000);
    }

    #[test]
    fn test_credential_and_overrides_parse() {
        let cli = Cli::try_parse_from([
            "gemini-probe-cli",
            "sk-test1234567890",
            "--base-url",
            "http://localhost:8080",
            "--delay-ms",
            "50",
        ])
        .unwrap();
        assert_eq!(cli.credential.as_deref(), Some("sk-test1234567890"));
        assert_eq!(cli.base_url, "http://localhost:8080");
        assert_eq!(cli.delay_ms, 50);
    }
}
