//! Set Cart Line Quantity Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use storefront_app::domain::carts::models::Quantity;

use crate::{
    carts::{
        errors::{into_api_error, invalid_payload},
        guards::{require_cart, require_line, require_product},
        models::{CartResponse, SetQuantityRequest},
    },
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Set Cart Line Quantity Handler
///
/// Overwrites the quantity of a line already in the cart.
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

    let body = req
        .parse_json::<SetQuantityRequest>()
        .await
        .map_err(|error| invalid_payload(&error.to_string()))?;

    let quantity =
        Quantity::try_from(body.quantity).map_err(|error| invalid_payload(&error.to_string()))?;

    let updated = state
        .app
        .carts
        .set_line_quantity(cart, product, quantity)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, Some(&raw_product)))?;

    info!(cart = %cart, product = %product, %quantity, "cart line quantity set");

    Ok(success(updated.into()))
}
