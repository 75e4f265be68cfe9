//! Pixelport Core - Shared types library.
//!
//! Common domain types used by the storefront: newtype entity IDs and the
//! validated [`Email`] address. This crate contains only types - no I/O,
//! no database access, no HTTP clients.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
