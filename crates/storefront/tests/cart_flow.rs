//! Cross-module tests for the cart-to-checkout flow.
//!
//! These exercise the public cart API the way the handlers do, without a
//! live database: the cart is a pure value and every property here holds
//! independent of storage.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use pixelport_core::ProductId;
use pixelport_storefront::models::{Cart, Product, QuantityChange, clamp_quantity};

fn product(id: i32, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Game {id}"),
        price: price.parse().unwrap(),
        image: String::new(),
        category: "indie".to_string(),
    }
}

#[test]
fn worked_example_totals() {
    // cart = [{id:1, price:10, qty:2}, {id:2, price:5, qty:1}]
    let mut cart = Cart::default();
    cart.add(&product(1, "10.00"), 2);
    cart.add(&product(2, "5.00"), 1);

    assert_eq!(cart.total(), "25.00".parse::<Decimal>().unwrap());
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.lines()[0].line_total(), "20.00".parse().unwrap());
    assert_eq!(cart.lines()[1].line_total(), "5.00".parse().unwrap());
}

#[test]
fn double_add_never_duplicates_a_line() {
    let mut cart = Cart::default();
    for _ in 0..2 {
        cart.add(&product(1, "10.00"), 3);
    }

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 6);
}

#[test]
fn lenient_quantity_parsing_feeds_the_cart() {
    // The add handler coerces whatever the form posted before touching
    // the cart; a garbage quantity still adds exactly one unit.
    let mut cart = Cart::default();
    cart.add(&product(1, "10.00"), clamp_quantity(Some("not-a-number")));
    cart.add(&product(1, "10.00"), clamp_quantity(Some("-3")));

    assert_eq!(cart.lines()[0].quantity, 2);
}

#[test]
fn quantity_updates_preserve_the_floor_and_total() {
    let mut cart = Cart::default();
    cart.add(&product(1, "10.00"), 1);
    cart.add(&product(2, "5.00"), 1);

    let up = cart.update(ProductId::new(1), QuantityChange::Increment);
    assert_eq!(up.new_quantity, 2);
    assert_eq!(up.total, "25.00".parse::<Decimal>().unwrap());

    let down = cart.update(ProductId::new(1), QuantityChange::Decrement);
    let floor = cart.update(ProductId::new(1), QuantityChange::Decrement);
    assert_eq!(down.new_quantity, 1);
    assert_eq!(floor.new_quantity, 1);
    assert_eq!(floor.total, "15.00".parse::<Decimal>().unwrap());
}

#[test]
fn checkout_shape_of_the_cart() {
    // What checkout persists: the line snapshots and the computed total.
    // The order's total must equal the cart total at the moment of
    // checkout, independent of later price changes.
    let mut cart = Cart::default();
    cart.add(&product(1, "10.00"), 2);
    cart.add(&product(2, "5.00"), 1);

    let total_at_checkout = cart.total();
    let line_count = cart.lines().len();

    let recomputed: Decimal = cart.lines().iter().map(|l| l.line_total()).sum();
    assert_eq!(recomputed, total_at_checkout);
    assert_eq!(line_count, 2);

    // ...and the cart is cleared only afterwards.
    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn cart_survives_session_serialization() {
    let mut cart = Cart::default();
    cart.add(&product(1, "19.99"), 2);

    let stored = serde_json::to_value(&cart).unwrap();
    let restored: Cart = serde_json::from_value(stored).unwrap();

    assert_eq!(restored.lines(), cart.lines());
    assert_eq!(restored.total(), "39.98".parse::<Decimal>().unwrap());
}
