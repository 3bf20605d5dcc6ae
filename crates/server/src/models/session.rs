//! Session-related types.
//!
//! The session holds a single piece of authorization state: whether the
//! client has logged in as the admin. Absence of the flag (or of the whole
//! session) means non-admin.

/// Session keys for authorization data.
pub mod session_keys {
    /// Key for the admin flag (`bool`). Set to `true` on successful login;
    /// cleared by destroying the session on logout.
    pub const IS_ADMIN: &str = "is_admin";
}
