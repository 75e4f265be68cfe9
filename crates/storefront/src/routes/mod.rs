//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Catalog, filtered by ?search= and ?cat=
//!
//! # Auth
//! GET  /login             - Login page
//! POST /login             - Login action
//! GET  /register          - Register page
//! POST /register          - Register action
//! GET  /logout            - Destroy session
//!
//! # Cart
//! GET  /cart              - Cart page
//! POST /cart/add          - Add line item (redirects to /?added=true)
//! GET  /cart/remove/{id}  - Remove line item (redirects to /cart)
//! POST /cart/update       - Quantity +/- (JSON {success, newQty, total})
//!
//! # Checkout & orders (require auth)
//! POST /checkout          - Finalize order, renders confirmation
//! GET  /ticket/{id}       - PDF receipt
//! GET  /history           - Past orders, newest first
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Navigation context rendered on every page: who is logged in and how
/// many units are in the cart.
pub struct Nav {
    /// The logged-in user, if any.
    pub user: Option<CurrentUser>,
    /// Total units across cart lines, for the badge.
    pub cart_count: u32,
}

impl Nav {
    /// Load the navigation context from the session.
    ///
    /// # Errors
    ///
    /// Returns the session store error if the session cannot be read.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        let user = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await?;
        let cart = crate::models::session::load_cart(session).await?;
        Ok(Self {
            user,
            cart_count: cart.item_count(),
        })
    }
}

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove/{id}", get(cart::remove))
        .route("/cart/update", post(cart::update))
        .route("/checkout", post(checkout::checkout))
        .route("/ticket/{id}", get(orders::ticket))
        .route("/history", get(orders::history))
}
