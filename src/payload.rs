//! Probe endpoints and fixed request payloads.

use serde_json::{json, Value};

/// Generative Language API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text-generation model probed in phase 1.
pub const TEXT_MODEL: &str = "gemini-pro";

/// Multimodal model probed in phase 2.
pub const MULTIMODAL_MODEL: &str = "gemini-pro-vision";

/// Output cap for both probe payloads.
pub const MAX_OUTPUT_TOKENS: u32 = 256;

/// 1x1 transparent PNG, pre-encoded so the multimodal payload is self-contained.
pub const INLINE_IMAGE_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAAC0lEQVR4nGNgAAIAAAUAAXpeqz8AAAAASUVORK5CYII=";

/// Build a `generateContent` URL for a model.
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Fixed phase-1 body: one text part, capped output.
pub fn text_probe_body() -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": "Reply with the single word: pong" }]
        }],
        "generationConfig": { "maxOutputTokens": MAX_OUTPUT_TOKENS }
    })
}

/// Fixed phase-2 body: one text part plus an inline image part.
pub fn multimodal_probe_body() -> Value {
    json!({
        "contents": [{
            "parts": [
                { "text": "Describe this image in one word." },
                {
                    "inline_data": {
                        "mime_type": "image/png",
                        "data": INLINE_IMAGE_BASE64
                    }
                }
            ]
        }],
        "generationConfig": { "maxOutputTokens": MAX_OUTPUT_TOKENS }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url(DEFAULT_BASE_URL, "gemini-pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
        assert_eq!(
            generate_content_url("http://localhost:8080/", "gemini-pro-vision"),
            "http://localhost:8080/models/gemini-pro-vision:generateContent"
        );
    }

    #[test]
    fn test_text_body_shape() {
        let body = text_probe_body();
        assert!(body["contents"][0]["parts"][0]["text"].is_string());
        assert_eq!(body["generationConfig"]["maxOutputTokens"], MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_multimodal_body_has_text_and_image_parts() {
        let body = multimodal_probe_body();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].is_string());
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], INLINE_IMAGE_BASE64);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_inline_image_is_valid_png() {
        let bytes = STANDARD.decode(INLINE_IMAGE_BASE64).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
