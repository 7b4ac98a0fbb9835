//! Storefront
//!
//! Storefront is the client-side core of a small shop: a persisted shopping cart with
//! snapshot pricing, checkout field validation, and the order and receipt payloads handed
//! to the hosted backend.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod receipts;
pub mod storage;
