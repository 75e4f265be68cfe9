//! Session-stored types and helpers.
//!
//! The session owns exactly two values: the logged-in user's identity and
//! the cart. Handlers go through [`load_cart`]/[`save_cart`] so the cart is
//! always an explicit value, never ambient state.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use pixelport_core::{Email, UserId};

use super::cart::Cart;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
}

/// Session keys.
pub mod session_keys {
    /// Key for the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";
}

/// Load the cart from the session, defaulting to an empty cart.
///
/// # Errors
///
/// Returns the session store error if the session cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
///
/// # Errors
///
/// Returns the session store error if the session cannot be written.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}
