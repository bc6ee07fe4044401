//! HTTP surface of the showcase core.
//!
//! A thin orchestration layer: resolve the term, fetch from the gateway,
//! filter, paginate, respond. No persistence and no auth live here; the
//! gateway owns the store and this service owns the logic between it and
//! the UI.
//!
//!
//!
//! # Routes
//! - `GET /api/showcase/{major}` — one major's listing for the resolved
//!   term, searchable and paginated
//! - `GET /api/showcase` — major-agnostic listing
//! - `GET /api/winners` — curated winners with display seasons
//! - `GET /api/curation/{semester}/{year}` — editorial view over the wide
//!   month buckets (`sp`/`su`/`fa`/`all`)
//! - `GET /api/curation` — editorial view for the date-based current term
//!
//! Listing routes accept an optional `session` query parameter, a
//! client-chosen identity. Requests sharing one share the stored term
//! preference, and a newer request supersedes the same session's in-flight
//! resolution walk; other sessions are untouched. Requests without one get
//! fresh state.
//!
//! Malformed parameters are a 400. A gateway failure on a data fetch is a
//! 200 with an empty list and a `gatewayError` note, so the UI renders a
//! retryable empty state instead of crashing.

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use routes::{
    curation_default_handler, curation_handler, showcase_handler, showcase_major_handler,
    winners_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/showcase", get(showcase_handler))
        .route("/api/showcase/{major}", get(showcase_major_handler))
        .route("/api/winners", get(winners_handler))
        .route("/api/curation", get(curation_default_handler))
        .route("/api/curation/{semester}/{year}", get(curation_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
