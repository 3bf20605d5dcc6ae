//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check
//!
//! # Catalog (public)
//! GET  /products        - Product listing (optional ?category= and ?q= filters)
//!
//! # Auth
//! POST /login           - Admin login ({username, password})
//! GET  /logout          - Destroy the current session
//! GET  /check-admin     - Report the session's admin flag
//!
//! # Admin mutations (require admin session)
//! POST /add-product     - Create a product (multipart: name, desc, price,
//!                         category, status, images[<=5])
//! POST /delete-product  - Delete a product ({id})
//!
//! # Contact
//! POST /send-message    - Record a cooperation inquiry ({name, email, message})
//!
//! # Static
//! GET  /uploads/*       - Uploaded product images (ServeDir, mounted in main)
//! ```
//!
//! All mutation responses use the `{success, message?}` JSON shape; errors
//! carry `success: false` and the status code from the error taxonomy.

pub mod auth;
pub mod messages;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Request-body cap for product uploads.
///
/// Axum's 2 MB default is far too small for product photos; up to 5
/// images per product at camera sizes need room. Photos are buffered in
/// memory, so the cap stays finite.
const UPLOAD_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Create the auth routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/check-admin", get(auth::check_admin))
}

/// Create the catalog and admin product routes.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route(
            "/add-product",
            post(products::add).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/delete-product", post(products::delete))
}

/// Create the contact message routes.
pub fn message_routes() -> Router<AppState> {
    Router::new().route("/send-message", post(messages::send))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .merge(auth_routes())
        .merge(message_routes())
}
