//! The session-scoped shopping cart.
//!
//! A [`Cart`] is a plain serializable value stored in the session, one per
//! browser client. All mutation happens through the methods here; handlers
//! load the cart, mutate it, and write it back. Nothing is persisted to the
//! database until checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pixelport_core::ProductId;

use super::product::Product;

/// One product-quantity-price tuple within the cart.
///
/// `unit_price` is a snapshot of the catalog price at add-time, decoupled
/// from later catalog price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Product name snapshot, for display.
    pub name: String,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// Image reference snapshot.
    pub image: String,
    /// Units in the cart. Never below 1.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Direction for a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityChange {
    /// Add one unit.
    Increment,
    /// Remove one unit, unless the line is already at 1.
    Decrement,
}

/// Result of a quantity update: the line's new quantity and the recomputed
/// cart total. `new_quantity` is 0 when the product was not in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartUpdate {
    /// Quantity after the update, or 0 if the product was absent.
    pub new_quantity: u32,
    /// Cart total after the update.
    pub total: Decimal,
}

/// An ordered sequence of cart lines, unique by product ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add `quantity` units of `product`, snapshotting its current name,
    /// price, and image.
    ///
    /// If the product is already in the cart the quantities sum; otherwise
    /// a new line is appended. Always succeeds.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                image: product.image.clone(),
                quantity,
            });
        }
    }

    /// Apply a one-unit quantity change to the given product's line.
    ///
    /// Increment always applies; decrement is a no-op when the line is at
    /// quantity 1 (it never removes the line). An absent product is not an
    /// error: the result carries the quantity-0 sentinel.
    pub fn update(&mut self, product_id: ProductId, change: QuantityChange) -> CartUpdate {
        let new_quantity = match self.line_mut(product_id) {
            Some(line) => {
                match change {
                    QuantityChange::Increment => {
                        line.quantity = line.quantity.saturating_add(1);
                    }
                    QuantityChange::Decrement if line.quantity > 1 => {
                        line.quantity -= 1;
                    }
                    QuantityChange::Decrement => {}
                }
                line.quantity
            }
            None => 0,
        };

        CartUpdate {
            new_quantity,
            total: self.total(),
        }
    }

    /// Remove the line for `product_id`. Absence is not an error.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines (the nav badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart's lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Empty the cart. Used by checkout after the order is committed.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

/// Coerce a raw quantity form field into a usable quantity.
///
/// The storefront never rejects a bad quantity: missing, non-numeric, zero,
/// and negative inputs all coerce to 1; values past `u32::MAX` saturate.
#[must_use]
pub fn clamp_quantity(input: Option<&str>) -> u32 {
    input
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(1, |q| u32::try_from(q.max(1)).unwrap_or(u32::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Game {id}"),
            price: price.parse().unwrap(),
            image: format!("game-{id}.png"),
            category: "action".to_string(),
        }
    }

    #[test]
    fn adding_same_product_twice_merges_quantities() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 2);
        cart.add(&product(1, "10.00"), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn adding_different_products_appends_in_order() {
        let mut cart = Cart::default();
        cart.add(&product(2, "5.00"), 1);
        cart.add(&product(1, "10.00"), 1);

        let ids: Vec<i32> = cart
            .lines()
            .iter()
            .map(|l| l.product_id.as_i32())
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn add_snapshots_price_at_add_time() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 1);

        // A later catalog price change must not affect the snapshot
        let mut repriced = product(1, "99.99");
        repriced.id = ProductId::new(2);
        cart.add(&repriced, 1);

        assert_eq!(cart.lines()[0].unit_price, "10.00".parse().unwrap());
    }

    #[test]
    fn add_clamps_zero_quantity_to_one() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 0);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn increment_always_applies() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 1);

        let update = cart.update(ProductId::new(1), QuantityChange::Increment);
        assert_eq!(update.new_quantity, 2);
        assert_eq!(update.total, "20.00".parse().unwrap());
    }

    #[test]
    fn decrement_never_goes_below_one() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 1);

        let update = cart.update(ProductId::new(1), QuantityChange::Decrement);
        assert_eq!(update.new_quantity, 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn increment_then_decrement_restores_quantity() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 3);

        cart.update(ProductId::new(1), QuantityChange::Increment);
        let update = cart.update(ProductId::new(1), QuantityChange::Decrement);
        assert_eq!(update.new_quantity, 3);
    }

    #[test]
    fn updating_absent_product_returns_sentinel() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 2);

        let update = cart.update(ProductId::new(99), QuantityChange::Increment);
        assert_eq!(update.new_quantity, 0);
        // Total is still the real cart total
        assert_eq!(update.total, "20.00".parse().unwrap());
    }

    #[test]
    fn remove_is_silent_on_absent_product() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 1);
        cart.remove(ProductId::new(99));
        assert_eq!(cart.lines().len(), 1);

        cart.remove(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn total_matches_worked_example() {
        // cart = [{id:1, price:10, qty:2}, {id:2, price:5, qty:1}] => 25
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 2);
        cart.add(&product(2, "5.00"), 1);

        assert_eq!(cart.total(), "25.00".parse().unwrap());
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn cart_round_trips_through_serde() {
        let mut cart = Cart::default();
        cart.add(&product(1, "10.00"), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lines(), cart.lines());
    }

    #[test]
    fn clamp_quantity_coerces_bad_input_to_one() {
        assert_eq!(clamp_quantity(None), 1);
        assert_eq!(clamp_quantity(Some("")), 1);
        assert_eq!(clamp_quantity(Some("abc")), 1);
        assert_eq!(clamp_quantity(Some("0")), 1);
        assert_eq!(clamp_quantity(Some("-4")), 1);
    }

    #[test]
    fn clamp_quantity_keeps_valid_input() {
        assert_eq!(clamp_quantity(Some("1")), 1);
        assert_eq!(clamp_quantity(Some(" 7 ")), 7);
    }

    #[test]
    fn clamp_quantity_saturates_oversized_input() {
        assert_eq!(clamp_quantity(Some("4294967296")), u32::MAX);
        assert_eq!(clamp_quantity(Some("4294967295")), u32::MAX);
    }
}
