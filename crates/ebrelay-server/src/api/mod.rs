mod notifications;
mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use chrono::{DateTime, Utc};
use ebrelay_core::AppConfig;
use ebrelay_ebay::SearchGateway;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

pub const SEARCH_ROUTE: &str = "/api/ebay/search";
pub const BROWSE_ROUTE: &str = "/api/ebay/browse";
pub const ACCOUNT_DELETION_ROUTE: &str = "/api/ebay/notifications/account-deletion";

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SearchGateway>,
    pub notifications: Arc<NotificationSettings>,
}

/// Handshake and acknowledgement settings for the account-deletion endpoint.
#[derive(Clone)]
pub struct NotificationSettings {
    pub verification_token: Option<String>,
    /// Exact URL registered with eBay; reconstructed per request when unset.
    pub endpoint: Option<String>,
    pub accept_unverified: bool,
}

impl NotificationSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            verification_token: config.notification_token.clone(),
            endpoint: config.notification_endpoint.clone(),
            accept_unverified: config.accept_unverified_notifications,
        }
    }
}

impl std::fmt::Debug for NotificationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSettings")
            .field(
                "verification_token",
                &self.verification_token.as_ref().map(|_| "[redacted]"),
            )
            .field("endpoint", &self.endpoint)
            .field("accept_unverified", &self.accept_unverified)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(SEARCH_ROUTE, get(search::legacy_search))
        .route(BROWSE_ROUTE, get(search::modern_search))
        .route(ACCOUNT_DELETION_ROUTE, any(notifications::account_deletion))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "OK",
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
