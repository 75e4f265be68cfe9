//! Checkout route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;

use pixelport_core::OrderId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::session::{load_cart, save_cart};
use crate::services::CheckoutService;
use crate::state::AppState;

use super::Nav;

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct SuccessTemplate {
    pub order_id: OrderId,
    pub nav: Nav,
}

/// Finalize the cart as an order.
///
/// `RequireAuth` has already bounced anonymous visitors to the login page;
/// an empty cart redirects back to the catalog via the error mapping. The
/// session cart is cleared only after the order is committed, so a storage
/// failure leaves it intact for retry.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<SuccessTemplate> {
    let mut cart = load_cart(&session).await?;

    let order_id = CheckoutService::new(state.pool())
        .place_order(user.id, &cart)
        .await?;

    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(SuccessTemplate {
        order_id,
        nav: Nav {
            user: Some(user),
            cart_count: 0,
        },
    })
}
