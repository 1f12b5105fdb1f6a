//! Credential probe runner.
//!
//! Two phases against the service: a single text-generation request with
//! bearer auth, then a multimodal request per auth strategy until one is
//! accepted. Every outcome is printed; nothing here aborts the run.

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::{AuthStrategy, STRATEGY_ORDER};
use crate::payload::{self, MULTIMODAL_MODEL, TEXT_MODEL};
use crate::report;

/// Characters of the response body shown per phase-2 attempt.
const BODY_PREVIEW_CHARS: usize = 200;

/// Transport-level failure of a single attempt.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    /// A response arrived but its body could not be read.
    #[error("response body unreadable: {0}")]
    Body(reqwest::Error),
}

/// Outcome of one probe attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// 2xx from the service.
    Success { status: StatusCode },
    /// Non-2xx from the service.
    Rejected { status: StatusCode },
    /// No usable response at all.
    Failed(AttemptFailure),
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }
}

/// Phase-2 summary: every attempt made, plus the winning strategy if any.
#[derive(Debug)]
pub struct MultimodalReport {
    pub attempts: Vec<(AuthStrategy, AttemptOutcome)>,
    pub winner: Option<AuthStrategy>,
}

/// Drives both probe phases with one credential against one base URL.
pub struct ProbeRunner {
    client: Client,
    base_url: String,
    credential: String,
    attempt_delay: Duration,
}

impl ProbeRunner {
    pub fn new(credential: String, base_url: String, attempt_delay: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credential,
            attempt_delay,
        })
    }

    /// Phase 1: one text-generation request with bearer auth. The outcome is
    /// printed and returned; a failure here never stops phase 2.
    pub async fn text_probe(&self) -> AttemptOutcome {
        println!();
        println!("--- phase 1: text generation ({}) ---", TEXT_MODEL);

        let url = payload::generate_content_url(&self.base_url, TEXT_MODEL);
        let outcome = self
            .attempt(&url, AuthStrategy::Bearer, payload::text_probe_body(), None)
            .await;

        match &outcome {
            AttemptOutcome::Success { status } => {
                println!("[OK] text probe accepted ({})", status);
            }
            AttemptOutcome::Rejected { status } => {
                println!("[FAIL] text probe rejected ({})", status);
            }
            AttemptOutcome::Failed(failure) => {
                println!("[FAIL] text probe: {}", failure);
            }
        }

        outcome
    }

    /// Phase 2: multimodal probe, one attempt per strategy in fixed order,
    /// stopping at the first success. Consecutive attempts are separated by
    /// the configured delay; nothing is ever retried.
    pub async fn multimodal_probe(&self) -> MultimodalReport {
        println!();
        println!("--- phase 2: multimodal generation ({}) ---", MULTIMODAL_MODEL);

        let url = payload::generate_content_url(&self.base_url, MULTIMODAL_MODEL);
        let mut attempts = Vec::new();
        let mut winner = None;

        for (index, strategy) in STRATEGY_ORDER.iter().copied().enumerate() {
            if index > 0 {
                println!(
                    "waiting {}ms before the next strategy...",
                    self.attempt_delay.as_millis()
                );
                tokio::time::sleep(self.attempt_delay).await;
            }

            println!();
            println!(
                "[{}/{}] strategy: {}",
                index + 1,
                STRATEGY_ORDER.len(),
                strategy
            );

            let outcome = self
                .attempt(
                    &url,
                    strategy,
                    payload::multimodal_probe_body(),
                    Some(BODY_PREVIEW_CHARS),
                )
                .await;

            match &outcome {
                AttemptOutcome::Success { status } => {
                    println!(
                        "[OK] strategy {} accepted ({}) - remaining strategies skipped",
                        strategy, status
                    );
                    winner = Some(strategy);
                }
                AttemptOutcome::Rejected { status } => {
                    println!("[FAIL] strategy {} rejected ({})", strategy, status);
                    if *status == StatusCode::UNAUTHORIZED {
                        println!(
                            "note: 401 unauthorized - the service did not accept this credential shape"
                        );
                    }
                }
                AttemptOutcome::Failed(failure) => {
                    println!("[FAIL] strategy {}: {}", strategy, failure);
                }
            }

            let stop = outcome.is_success();
            attempts.push((strategy, outcome));
            if stop {
                break;
            }
        }

        if winner.is_none() {
            println!();
            println!("no strategy was accepted by the service");
        }

        MultimodalReport { attempts, winner }
    }

    /// One request/response cycle: send, then print status, headers, and the
    /// body (optionally previewed). HTTP and transport failures are both
    /// converted into an outcome; neither propagates.
    async fn attempt(
        &self,
        url: &str,
        strategy: AuthStrategy,
        body: Value,
        body_preview: Option<usize>,
    ) -> AttemptOutcome {
        debug!("POST {} (strategy: {})", url, strategy);
        println!("POST {}", url);

        let mut request = self.client.post(url).json(&body);
        for (name, value) in strategy.headers(&self.credential) {
            request = request.header(name, value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("request error for strategy {}: {}", strategy, e);
                return AttemptOutcome::Failed(AttemptFailure::Transport(e));
            }
        };

        let status = response.status();
        println!("status: {}", status);
        println!("headers:");
        println!("{}", report::format_headers(response.headers()));

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("body read error for strategy {}: {}", strategy, e);
                return AttemptOutcome::Failed(AttemptFailure::Body(e));
            }
        };

        match body_preview {
            Some(limit) => println!("body: {}", report::truncate_body(&text, limit)),
            None => println!("body: {}", text),
        }

        if status.is_success() {
            AttemptOutcome::Success { status }
        } else {
            if let Some(error) = report::parse_service_error(&text) {
                if let Some(message) = error.message {
                    match error.status {
                        Some(status) => println!("service says: {} ({})", message, status),
                        None => println!("service says: {}", message),
                    }
                }
            }
            AttemptOutcome::Rejected { status }
        }
    }
}
