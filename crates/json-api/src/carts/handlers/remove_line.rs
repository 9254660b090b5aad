//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{
    carts::{
        errors::into_api_error,
        guards::{require_cart, require_line, require_product},
        models::CartResponse,
    },
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Remove Cart Line Handler
///
/// Removes the line holding a product. The line must already be in the cart.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_cart = req.param::<String>("cart").unwrap_or_default();
    let raw_product = req.param::<String>("product").unwrap_or_default();

    let cart = require_cart(state, &raw_cart).await?;
    let product = require_product(state, &raw_product).await?;

    let current = state
        .app
        .carts
        .get_cart(cart)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, Some(&raw_product)))?;

    require_line(&current, product, &raw_cart, &raw_product)?;

    let updated = state
        .app
        .carts
        .remove_line(cart, product)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, Some(&raw_product)))?;

    info!(cart = %cart, product = %product, "cart line removed");

    Ok(success(updated.into()))
}
