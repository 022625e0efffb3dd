//! Recovers the JSON object the webhook embeds in its text response.
//!
//! The automation service sometimes surrounds the object with log lines or
//! prose, so the body is scanned for the outermost braces instead of being
//! decoded directly. Braces inside string values or several top-level
//! objects can yield a wrong slice; that is accepted.

use shared::protocol::AnalysisPayload;

use crate::error::WebhookError;

/// Returns the text from the first `{` through the last `}` inclusive.
pub fn extract_json(text: &str) -> Result<&str, WebhookError> {
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(WebhookError::MalformedResponse {
            raw: text.to_string(),
        }),
    }
}

pub fn decode_payload(text: &str) -> Result<AnalysisPayload, WebhookError> {
    let candidate = extract_json(text)?;
    serde_json::from_str(candidate).map_err(|source| WebhookError::Decode {
        raw: text.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/response_tests.rs"]
mod tests;
