//! Business services over the repositories.

pub mod auth;
pub mod checkout;
pub mod receipt;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutService};
pub use receipt::{ReceiptError, ReceiptService};
