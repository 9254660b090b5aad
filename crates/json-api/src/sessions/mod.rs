//! Sessions

mod errors;
pub(crate) mod handlers;
mod models;

pub(crate) use handlers::*;
