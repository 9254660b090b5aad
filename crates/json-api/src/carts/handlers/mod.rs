//! Cart Handlers

pub(crate) mod add_line;
pub(crate) mod clear;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod remove_line;
pub(crate) mod replace;
pub(crate) mod set_quantity;
