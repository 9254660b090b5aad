//! Replace Cart Lines Handler

use std::{collections::HashSet, sync::Arc};

use salvo::prelude::*;
use tracing::info;

use storefront_app::domain::{
    carts::models::{NewCartLine, Quantity},
    existence::Existence,
    products::models::ProductUuid,
};

use crate::{
    carts::{
        errors::{into_api_error, invalid_payload, product_not_found},
        guards::require_cart,
        models::{CartLineRequest, CartResponse},
    },
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Replace Cart Lines Handler
///
/// Swaps the whole line sequence for the given one. Every referenced product is
/// looked up before anything is written, so the cart changes all at once or not at all.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_cart = req.param::<String>("cart").unwrap_or_default();

    let cart = require_cart(state, &raw_cart).await?;

    let requested = req
        .parse_json::<Vec<CartLineRequest>>()
        .await
        .map_err(|error| invalid_payload(&error.to_string()))?;

    let checked = check_lines(&requested)?;

    let mut lines = Vec::with_capacity(checked.len());
    let mut first_missing = None;
    let mut faulted = false;

    for (raw_product, product, quantity) in checked {
        let existence = match product {
            Some(product) => {
                let existence = state.app.products.product_exists(product).await;

                lines.push(NewCartLine {
                    product_uuid: product,
                    quantity,
                });

                existence
            }
            None => Existence::Absent,
        };

        match existence {
            Existence::Found => {}
            Existence::Absent => {
                first_missing.get_or_insert(raw_product);
            }
            Existence::Fault => faulted = true,
        }
    }

    if faulted {
        return Err(ApiError::internal());
    }

    if let Some(raw_product) = first_missing {
        return Err(product_not_found(raw_product));
    }

    let line_count = lines.len();

    let updated = state
        .app
        .carts
        .replace_lines(cart, lines)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, None))?;

    info!(cart = %cart, lines = line_count, "cart lines replaced");

    Ok(success(updated.into()))
}

type CheckedLine<'a> = (&'a str, Option<ProductUuid>, Quantity);

/// Validate quantities and reject repeated products, keeping payload order.
///
/// Repeats are found on the parsed id, so differently spelled forms of one
/// UUID collide. Unparseable ids are passed through as `None`.
fn check_lines(requested: &[CartLineRequest]) -> Result<Vec<CheckedLine<'_>>, ApiError> {
    let mut seen = HashSet::with_capacity(requested.len());

    requested
        .iter()
        .map(|line| {
            let raw_product = line.id_product.trim();

            let quantity = Quantity::try_from(line.quantity)
                .map_err(|error| invalid_payload(&error.to_string()))?;

            let product = ProductUuid::parse(raw_product).ok();

            if product.is_some_and(|product| !seen.insert(product)) {
                return Err(invalid_payload(&format!(
                    "product {raw_product} is listed more than once"
                )));
            }

            Ok((raw_product, product, quantity))
        })
        .collect()
}
