// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront_server::{
    api::router,
    config::{AppConfig, LOG_FORMAT_ENV},
    providers::{CloudinaryClient, DisabledUploader, ImageUploader},
    state::AppState,
    storage::CredentialStore,
};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());

    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_default();
    if log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "storefront-server starting");

    let config = AppConfig::from_env().expect("Invalid configuration");
    let addr = config.bind_addr().expect("Failed to parse bind address");

    let store = CredentialStore::open(&config.database_path())
        .expect("Failed to open credential database");
    info!(path = %config.database_path().display(), "Credential database opened");

    let images: Arc<dyn ImageUploader> = match config.image_provider.as_ref() {
        Some(provider) => Arc::new(
            CloudinaryClient::new(provider).expect("Failed to build image provider client"),
        ),
        None => {
            warn!("Image provider not configured; profile picture uploads are disabled");
            Arc::new(DisabledUploader)
        }
    };

    let app = router(AppState::new(config, store, images));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    info!("Storefront server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    info!("Shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
