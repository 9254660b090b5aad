//! Carts

mod errors;
mod guards;
pub(crate) mod handlers;
mod models;

pub(crate) use handlers::*;
