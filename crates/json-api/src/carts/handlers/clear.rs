//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{
    carts::{errors::into_api_error, guards::require_cart, models::CartResponse},
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
///
/// Removes every line from the cart.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_cart = req.param::<String>("cart").unwrap_or_default();

    let cart = require_cart(state, &raw_cart).await?;

    let cleared = state
        .app
        .carts
        .clear_lines(cart)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, None))?;

    info!(cart = %cart, "cart cleared");

    Ok(success(cleared.into()))
}
