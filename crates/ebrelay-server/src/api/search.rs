use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use ebrelay_core::{SearchEnvelope, SearchPath};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::AppState;

/// Used when the caller omits `query` or sends it empty.
pub(super) const DEFAULT_QUERY: &str = "cabela 2013 wii u";

/// Only `query` is read; anything else (`limit`, ...) is ignored.
#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub query: Option<String>,
}

impl SearchQuery {
    fn text(&self) -> &str {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUERY)
    }
}

pub(super) async fn legacy_search(
    state: State<AppState>,
    req_id: Extension<RequestId>,
    query: Query<SearchQuery>,
) -> (StatusCode, Json<SearchEnvelope>) {
    run_search(state, req_id, query, SearchPath::Legacy).await
}

pub(super) async fn modern_search(
    state: State<AppState>,
    req_id: Extension<RequestId>,
    query: Query<SearchQuery>,
) -> (StatusCode, Json<SearchEnvelope>) {
    run_search(state, req_id, query, SearchPath::Modern).await
}

async fn run_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
    requested: SearchPath,
) -> (StatusCode, Json<SearchEnvelope>) {
    let text = query.text();
    tracing::info!(request_id = %req_id.0, query = text, path = %requested, "search request");

    let outcome = state.gateway.search(text, requested).await;
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome.envelope))
}
