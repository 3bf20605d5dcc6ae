//! Integration tests for Volga Market.
//!
//! Each test spawns the full server in-process on an ephemeral port with a
//! temporary data and upload directory, then drives it over HTTP with a
//! cookie-holding reqwest client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p volga-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, routing::get};
use secrecy::SecretString;
use tempfile::TempDir;
use tower_http::services::ServeDir;

use volga_server::config::{AdminCredentials, ServerConfig};
use volga_server::state::AppState;
use volga_server::store::Store;
use volga_server::{middleware, routes};

/// A running test server rooted in a temporary directory.
///
/// The directory (and everything persisted into it) is removed when this
/// is dropped.
pub struct TestServer {
    pub base_url: String,
    _dir: TempDir,
}

/// Spawn the server on an ephemeral port with fresh temporary storage.
///
/// # Panics
///
/// Panics on any setup failure; these are test-environment errors.
pub async fn spawn_server() -> TestServer {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let config = ServerConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        data_dir: dir.path().join("data"),
        upload_dir: dir.path().join("uploads"),
        admin: AdminCredentials {
            username: "admin".to_string(),
            password: SecretString::from("volga123"),
        },
    };

    let store = Store::open(&config.data_dir)
        .await
        .expect("Failed to open store");
    let upload_dir = config.upload_dir.clone();
    let state = AppState::new(config, store);
    state
        .uploads()
        .ensure_dir()
        .await
        .expect("Failed to create upload directory");

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::routes())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(middleware::create_session_layer())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        _dir: dir,
    }
}

/// Create an HTTP client that holds session cookies across requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log the client in as the admin. Panics if the login does not succeed.
pub async fn login_as_admin(client: &reqwest::Client, base_url: &str) {
    let resp = client
        .post(format!("{base_url}/login"))
        .json(&serde_json::json!({"username": "admin", "password": "volga123"}))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(resp.status().is_success(), "admin login failed");
}
