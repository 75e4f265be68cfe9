//! Catalog product domain type.

use rust_decimal::Decimal;

use pixelport_core::ProductId;

/// A catalog product.
///
/// Immutable from the cart's perspective; the cart takes a snapshot of the
/// name, price, and image at add-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: Decimal,
    /// Image reference (path under /static or an absolute URL).
    pub image: String,
    /// Category tag used for catalog filtering.
    pub category: String,
}
