//! Checkout orchestration.
//!
//! One checkout attempt walks a fixed sequence: the caller proves
//! authentication (the `RequireAuth` extractor), the cart is checked for
//! emptiness, then the order header and its lines are written in one
//! transaction. The session cart is cleared by the route only after
//! [`CheckoutService::place_order`] returns the new order ID, so a failed
//! attempt always leaves the cart intact for retry.

use sqlx::PgPool;
use thiserror::Error;

use pixelport_core::{OrderId, UserId};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::models::Cart;

/// Errors from a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines; nothing was written.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The order could not be persisted; nothing was committed.
    #[error("order persistence failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout orchestrator.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Persist the cart as an order owned by `user_id`.
    ///
    /// The total is computed from the cart's price snapshots once, here,
    /// and becomes the immutable `Order.total`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` without touching storage if the
    /// cart has no lines, and `CheckoutError::Repository` if the
    /// transactional write fails.
    pub async fn place_order(
        &self,
        user_id: UserId,
        cart: &Cart,
    ) -> Result<OrderId, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = cart.total();
        let order_id = self.orders.create(user_id, total, cart.lines()).await?;

        tracing::info!(%order_id, %user_id, %total, "order placed");
        Ok(order_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // A lazy pool never connects until a query runs, so the empty-cart
    // gate can be exercised without a database: it must return before
    // any query is issued.
    fn lazy_pool() -> PgPool {
        PgPool::connect_lazy("postgres://nobody@localhost/unreachable").unwrap()
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_write() {
        let pool = lazy_pool();
        let result = CheckoutService::new(&pool)
            .place_order(UserId::new(1), &Cart::default())
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn empty_cart_error_is_descriptive() {
        let err = CheckoutError::EmptyCart;
        assert_eq!(err.to_string(), "cannot check out an empty cart");
    }
}
