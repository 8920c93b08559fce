//! `ANY /api/ebay/notifications/account-deletion`.
//!
//! Challenge requests get `{"challengeResponse": <hex>}`. Anything else is a
//! delivered notification: recorded in the log and acknowledged with
//! `{"ok": true}` while unverified acknowledgement is enabled, refused with 501
//! otherwise.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{OriginalUri, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use ebrelay_ebay::{challenge_response, extract_challenge_code, NotificationRecord};
use serde_json::{json, Map, Value};

use crate::middleware::RequestId;

use super::{AppState, NotificationSettings};

const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
const DIGEST_LOG_PREFIX: usize = 12;

pub(super) async fn account_deletion(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let settings = state.notifications.as_ref();
    let body = decode_body(&headers, &body);

    let challenge = match extract_challenge_code(&query, &body) {
        Ok(challenge) => challenge,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "account-deletion challenge failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "challenge-handling-error"})),
            )
                .into_response();
        }
    };

    if let Some(code) = challenge {
        let endpoint = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| reconstruct_endpoint(&headers, &uri));
        return handshake(settings, &req_id, &code, &endpoint).into_response();
    }

    let record = NotificationRecord::capture(
        method.as_str(),
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
        &query,
        body,
    );
    acknowledge(settings, &req_id, &record)
}

fn handshake(
    settings: &NotificationSettings,
    req_id: &RequestId,
    code: &str,
    endpoint: &str,
) -> Json<Value> {
    if settings.verification_token.is_none() {
        tracing::warn!(
            request_id = %req_id.0,
            "EBAY_NOTIFICATION_TOKEN is not set; challenge response will not match eBay's"
        );
    }

    let digest = challenge_response(code, settings.verification_token.as_deref(), endpoint);
    tracing::info!(
        request_id = %req_id.0,
        endpoint,
        digest_prefix = &digest[..DIGEST_LOG_PREFIX],
        "account-deletion challenge answered"
    );
    Json(json!({"challengeResponse": digest}))
}

fn acknowledge(
    settings: &NotificationSettings,
    req_id: &RequestId,
    record: &NotificationRecord,
) -> Response {
    let signed = record.signature().is_some();

    if !settings.accept_unverified {
        tracing::warn!(
            request_id = %req_id.0,
            method = %record.method,
            signed,
            "refusing account-deletion notification: signature verification unavailable"
        );
        return (
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({"error": "signature-verification-unavailable"})),
        )
            .into_response();
    }

    let logged = serde_json::to_string(record).unwrap_or_default();
    tracing::info!(
        request_id = %req_id.0,
        method = %record.method,
        signed,
        received_at = %record.received_at,
        record = %logged,
        "account-deletion notification received (signature not verified)"
    );
    Json(json!({"ok": true})).into_response()
}

/// Parses the request body as a urlencoded form or JSON, depending on the
/// content type. Unparseable text is kept as a JSON string; an empty body is
/// `null`.
fn decode_body(headers: &HeaderMap, body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        let fields: Map<String, Value> = url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        return Value::Object(fields);
    }

    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// `<scheme>://<host><path and query>`, with the scheme taken from
/// `x-forwarded-proto` (first hop) and defaulting to `http`.
fn reconstruct_endpoint(headers: &HeaderMap, uri: &axum::http::Uri) -> String {
    let scheme = headers
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(axum::http::uri::Authority::as_str))
        .unwrap_or_default();
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path(), axum::http::uri::PathAndQuery::as_str);

    format!("{scheme}://{host}{path_and_query}")
}
