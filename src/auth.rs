//! Authentication strategies.
//!
//! The Generative Language endpoints accept a credential in three different
//! header shapes depending on how the account was provisioned. The probe
//! tries each shape in a fixed order.

use serde::{Deserialize, Serialize};

/// One way of attaching the credential to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStrategy {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Service-specific `x-goog-api-key` header
    ApiKeyHeader,
    /// Raw credential as the `Authorization` value, no scheme prefix
    Raw,
}

/// Fixed probe order. The first accepted strategy wins; the rest are skipped.
pub const STRATEGY_ORDER: [AuthStrategy; 3] = [
    AuthStrategy::Bearer,
    AuthStrategy::ApiKeyHeader,
    AuthStrategy::Raw,
];

impl std::fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStrategy::Bearer => write!(f, "bearer"),
            AuthStrategy::ApiKeyHeader => write!(f, "api_key_header"),
            AuthStrategy::Raw => write!(f, "raw_authorization"),
        }
    }
}

impl AuthStrategy {
    /// Build the header set for this strategy.
    pub fn headers(&self, credential: &str) -> Vec<(&'static str, String)> {
        match self {
            AuthStrategy::Bearer => vec![
                ("Authorization", format!("Bearer {}", credential)),
                ("Content-Type", "application/json".to_string()),
            ],
            AuthStrategy::ApiKeyHeader => vec![
                ("x-goog-api-key", credential.to_string()),
                ("Content-Type", "application/json".to_string()),
            ],
            AuthStrategy::Raw => vec![
                ("Authorization", credential.to_string()),
                ("Content-Type", "application/json".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_order_is_fixed() {
        assert_eq!(
            STRATEGY_ORDER,
            [
                AuthStrategy::Bearer,
                AuthStrategy::ApiKeyHeader,
                AuthStrategy::Raw
            ]
        );
    }

    #[test]
    fn test_bearer_headers() {
        let headers = AuthStrategy::Bearer.headers("test-key");
        assert_eq!(headers[0], ("Authorization", "Bearer test-key".to_string()));
        assert!(!headers.iter().any(|(name, _)| *name == "x-goog-api-key"));
    }

    #[test]
    fn test_api_key_header() {
        let headers = AuthStrategy::ApiKeyHeader.headers("test-key");
        assert_eq!(headers[0], ("x-goog-api-key", "test-key".to_string()));
        assert!(!headers.iter().any(|(name, _)| *name == "Authorization"));
    }

    #[test]
    fn test_raw_headers_have_no_scheme_prefix() {
        let headers = AuthStrategy::Raw.headers("test-key");
        assert_eq!(headers[0], ("Authorization", "test-key".to_string()));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AuthStrategy::Bearer.to_string(), "bearer");
        assert_eq!(AuthStrategy::ApiKeyHeader.to_string(), "api_key_header");
        assert_eq!(AuthStrategy::Raw.to_string(), "raw_authorization");
    }
}
