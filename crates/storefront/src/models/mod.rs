//! Domain models for the storefront.
//!
//! These are validated domain types, separate from the raw row structs the
//! repositories decode. The cart is the one mutable value: it lives in the
//! session and is persisted into `orders`/`order_lines` only at checkout.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine, CartUpdate, QuantityChange, clamp_quantity};
pub use order::{Order, Receipt, ReceiptLine};
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::User;
