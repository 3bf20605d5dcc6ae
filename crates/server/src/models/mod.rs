//! Shared model types for the server.

pub mod session;

pub use session::session_keys;
