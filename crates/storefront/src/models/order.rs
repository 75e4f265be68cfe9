//! Order and receipt domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use pixelport_core::{OrderId, UserId};

/// A completed order header.
///
/// Created exactly once per successful checkout and immutable thereafter.
/// `total` is the cart total at checkout time, never recomputed from
/// current catalog prices.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The buyer.
    pub user_id: UserId,
    /// Sum of `quantity * unit_price` over the order's lines.
    pub total: Decimal,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// A past order reconstructed for rendering (PDF receipt or history row).
#[derive(Debug, Clone)]
pub struct Receipt {
    /// The order this receipt describes.
    pub order_id: OrderId,
    /// The buyer (used for the ownership check on the ticket route).
    pub user_id: UserId,
    /// Buyer display name.
    pub buyer_name: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Order total as persisted at checkout.
    pub grand_total: Decimal,
    /// One entry per order line, in product-id order.
    pub lines: Vec<ReceiptLine>,
}

/// One line of a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    /// Units bought.
    pub quantity: i32,
    /// Product name at render time.
    pub product_name: String,
    /// `quantity * unit_price` with the unit price snapshotted at sale time.
    pub line_total: Decimal,
}
