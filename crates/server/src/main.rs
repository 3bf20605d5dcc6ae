//! Volga Market server - combined public storefront and admin API.
//!
//! This binary serves the catalog, the contact inbox, and the admin
//! mutations on a single port (3000 by default).
//!
//! # Architecture
//!
//! - Axum web framework with JSON endpoints
//! - tower-sessions (in-memory store) for the admin flag
//! - Flat-file JSON persistence: `products.json` and `messages.json`
//! - Uploaded images written to the upload directory and served back
//!   statically under `/uploads`
//!
//! Page rendering is an external collaborator; this binary only guarantees
//! the JSON and static-file contracts.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use volga_server::config::ServerConfig;
use volga_server::{middleware, routes, state::AppState, store::Store};

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "volga_server=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Open the flat-file store (corrupt documents recover as empty)
    let store = Store::open(&config.data_dir)
        .await
        .expect("Failed to open data directory");
    tracing::info!(data_dir = %config.data_dir.display(), "Store opened");

    // Build application state and make sure the upload directory exists
    let upload_dir = config.upload_dir.clone();
    let state = AppState::new(config.clone(), store);
    state
        .uploads()
        .ensure_dir()
        .await
        .expect("Failed to create upload directory");

    // Create session layer
    let session_layer = middleware::create_session_layer();

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
