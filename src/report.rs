//! Diagnostic rendering helpers.
//!
//! Everything the probe prints about a credential goes through here so the
//! raw key never reaches standard output.

use reqwest::header::HeaderMap;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Error envelope returned by the service on rejected requests.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: ServiceError,
}

/// The `error` object inside the envelope.
#[derive(Debug, Deserialize)]
pub struct ServiceError {
    pub message: Option<String>,
    pub status: Option<String>,
}

/// Best-effort parse of the service's error envelope.
pub fn parse_service_error(body: &str) -> Option<ServiceError> {
    serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .map(|b| b.error)
}

/// Mask a credential for display: at most the first 5 and last 4 characters.
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 9 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Short SHA-256 fingerprint of the credential.
pub fn fingerprint(credential: &str) -> String {
    let digest = Sha256::digest(credential.as_bytes());
    hex::encode(&digest[..8])
}

/// Truncate at a character boundary, marking the elision.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let cut: String = body.chars().take(max_chars).collect();
    format!("{}... [truncated]", cut)
}

/// Render response headers one per line, indented under a `headers:` label.
pub fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("    {}: {}", name, value.to_str().unwrap_or("<non-ascii>")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// hex encoding
mod hex {
    pub fn encode(data: impl AsRef<[u8]>) -> String {
        data.as_ref()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
