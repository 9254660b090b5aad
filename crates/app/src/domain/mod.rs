//! Storefront Domain Concerns

pub mod carts;
pub mod existence;
pub mod products;
pub mod users;
