//! Marketplace account-deletion notifications.
//!
//! Before eBay delivers notifications to an endpoint it sends a challenge
//! (`GET ?challenge_code=...`); the endpoint must answer with
//! `sha256(challenge_code ‖ verification_token ‖ endpoint_url)` in lowercase
//! hex. Real notifications are acknowledged with a 200 and recorded; their
//! `x-ebay-signature` is not verified here.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Header carrying eBay's payload signature.
pub const SIGNATURE_HEADER: &str = "x-ebay-signature";

/// Accepted spellings of the challenge parameter, in lookup order.
const CHALLENGE_KEYS: [&str; 2] = ["challenge_code", "challengeCode"];

/// Headers whose values never reach the logs.
const REDACTED_HEADERS: [&str; 3] = ["authorization", "cookie", "proxy-authorization"];

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("challenge code must be a string or number, got {kind}")]
    NonScalarChallenge { kind: &'static str },
}

/// Computes the handshake digest.
///
/// An unconfigured verification token hashes as the empty string; the digest
/// will not match eBay's, but the caller still gets an answer.
#[must_use]
pub fn challenge_response(
    challenge_code: &str,
    verification_token: Option<&str>,
    endpoint: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(challenge_code.as_bytes());
    hasher.update(verification_token.unwrap_or_default().as_bytes());
    hasher.update(endpoint.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Finds the challenge code in the query string, then in the body.
///
/// `body` is the decoded request body (JSON, or a urlencoded form turned into
/// a JSON object); anything that is not an object is ignored.
///
/// # Errors
///
/// Returns [`NotificationError::NonScalarChallenge`] when the body carries the
/// challenge key with an object or array value.
pub fn extract_challenge_code(
    query: &HashMap<String, String>,
    body: &serde_json::Value,
) -> Result<Option<String>, NotificationError> {
    if let Some(code) = CHALLENGE_KEYS
        .iter()
        .find_map(|key| query.get(*key).filter(|code| !code.is_empty()))
    {
        return Ok(Some(code.clone()));
    }

    for key in CHALLENGE_KEYS {
        if let Some(value) = body.get(key) {
            if let Some(code) = scalar_text(value)? {
                return Ok(Some(code));
            }
        }
    }
    Ok(None)
}

fn scalar_text(value: &serde_json::Value) -> Result<Option<String>, NotificationError> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) => Err(NotificationError::NonScalarChallenge { kind: "array" }),
        Value::Object(_) => Err(NotificationError::NonScalarChallenge { kind: "object" }),
    }
}

/// Everything worth keeping about a delivered notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: serde_json::Value,
    pub received_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Captures a notification. Credential-bearing headers are redacted and
    /// non-UTF-8 header values are dropped.
    #[must_use]
    pub fn capture<'a>(
        method: &str,
        headers: impl IntoIterator<Item = (&'a str, &'a [u8])>,
        query: &HashMap<String, String>,
        body: serde_json::Value,
    ) -> Self {
        let headers = headers
            .into_iter()
            .filter_map(|(name, value)| {
                let name = name.to_ascii_lowercase();
                if REDACTED_HEADERS.contains(&name.as_str()) {
                    return Some((name, "[redacted]".to_owned()));
                }
                std::str::from_utf8(value)
                    .ok()
                    .map(|v| (name, v.to_owned()))
            })
            .collect();

        Self {
            method: method.to_owned(),
            headers,
            query: query.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            body,
            received_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.headers
            .get(SIGNATURE_HEADER)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}
