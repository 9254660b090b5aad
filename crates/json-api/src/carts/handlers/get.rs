//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, guards::require_cart, models::CartResponse},
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns a cart with its lines.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_cart = req.param::<String>("cart").unwrap_or_default();

    let cart = require_cart(state, &raw_cart).await?;

    let cart = state
        .app
        .carts
        .get_cart(cart)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, None))?;

    Ok(success(cart.into()))
}
