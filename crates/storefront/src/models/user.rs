//! User domain type.

use pixelport_core::{Email, UserId};

/// A registered storefront user.
///
/// Read-only after registration; the password hash never leaves the
/// repository/auth layer.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: Email,
}
