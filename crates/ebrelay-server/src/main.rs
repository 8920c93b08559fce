mod api;
mod middleware;

use std::sync::Arc;

use ebrelay_core::AppConfig;
use ebrelay_ebay::SearchGateway;
use tracing_subscriber::EnvFilter;

use crate::api::{
    build_app, AppState, NotificationSettings, ACCOUNT_DELETION_ROUTE, SEARCH_ROUTE,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ebrelay_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    log_startup(&config);

    let state = AppState {
        gateway: Arc::new(SearchGateway::from_config(&config)?),
        notifications: Arc::new(NotificationSettings::from_config(&config)),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "ebrelay server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn log_startup(config: &AppConfig) {
    let port = config.bind_addr.port();
    tracing::info!(
        mode = config.mode_label(),
        environment = %config.env,
        site_id = %config.site_id,
        search = %format!("http://localhost:{port}{SEARCH_ROUTE}?query=..."),
        "starting ebrelay server"
    );

    let endpoint = config
        .notification_endpoint
        .clone()
        .unwrap_or_else(|| format!("http://localhost:{port}{ACCOUNT_DELETION_ROUTE}"));
    tracing::info!(
        endpoint = %endpoint,
        token_configured = config.notification_token.is_some(),
        unverified_ack = config.accept_unverified_notifications,
        "account-deletion notifications"
    );
    if config.notification_token.is_none() {
        tracing::warn!("EBAY_NOTIFICATION_TOKEN is not set; eBay handshakes will fail");
    }
    if config.is_demo_mode() {
        tracing::warn!("EBAY_APP_ID is not set; /api/ebay/search serves demo listings");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
